//! Inline directive commands.
//!
//! Parses the `op(arg, arg, key=value)` command form that hosts read
//! from directive lines (for example a mapping layer that pulls whole
//! files or named ranges into a document).

/// A parsed inline command: operation name, ordered positional
/// arguments, keyed options.
///
/// Parsing is purely structural; whether the operation exists or its
/// arguments make sense is decided by the consumer, not here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directive {
    /// Operation name.
    pub op: String,
    args: Vec<String>,
    opts: Vec<(String, String)>,
}

impl Directive {
    /// Parse the `op(arg, arg, key=value)` command form.
    ///
    /// The parenthesized list is optional. Items containing `=` become
    /// keyed options; everything else is a positional argument, in
    /// order. Returns `None` when `body` is not command-shaped.
    ///
    /// # Example
    ///
    /// ```
    /// use snip_core::Directive;
    ///
    /// let directive = Directive::parse("map(src/main.rs, fold=on)").unwrap();
    /// assert_eq!(directive.op, "map");
    /// assert_eq!(directive.arg(), Some("src/main.rs"));
    /// assert_eq!(directive.get("fold"), Some("on"));
    /// ```
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        let body = body.trim_end();
        let op_end = body
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(body.len());
        let op = &body[..op_end];
        if op.is_empty() {
            return None;
        }

        let mut directive = Self {
            op: op.to_owned(),
            ..Self::default()
        };

        let rest = &body[op_end..];
        if rest.is_empty() {
            return Some(directive);
        }

        let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
        if inner.trim().is_empty() {
            return Some(directive);
        }
        for item in inner.split(',') {
            let item = item.trim();
            match item.split_once('=') {
                Some((key, value)) => directive
                    .opts
                    .push((key.trim().to_owned(), value.trim().to_owned())),
                None => directive.args.push(item.to_owned()),
            }
        }
        Some(directive)
    }

    /// First positional argument.
    #[must_use]
    pub fn arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// All positional arguments in order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// First option value in insertion order.
    #[must_use]
    pub fn opt(&self) -> Option<&str> {
        self.opts.first().map(|(_, value)| value.as_str())
    }

    /// Option value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.opts
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }
}
