//! Counter reference directives.

use cnt_tree::{DirectiveArgs, Node};

use crate::to_safe_integer;

/// What a reference directive asks for.
///
/// Decided once from the attribute map. When several keys are present the
/// first of `reset`, `up`, `look` wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// `reset` or `reset=N`: define the counter and assign it.
    Reset(i64),
    /// `up`: increment and insert the new value.
    Up,
    /// `look`: insert the current value.
    Look,
    /// No action key: same as `look`.
    Bare,
}

impl Intent {
    #[must_use]
    pub fn from_args(args: &DirectiveArgs) -> Self {
        if let Some(value) = args.get("reset") {
            Self::Reset(to_safe_integer(value))
        } else if args.has("up") {
            Self::Up
        } else if args.has("look") {
            Self::Look
        } else {
            Self::Bare
        }
    }
}

/// Text directive naming a counter: `:cnt{name="fig" up}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub intent: Intent,
}

impl Reference {
    /// Read a reference from a text directive called `directive`.
    ///
    /// Returns `None` for other nodes and for directives without a
    /// non-empty `name`, which are left in the tree untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use cnt_counter::{Intent, Reference};
    /// use cnt_tree::{DirectiveArgs, Node};
    ///
    /// let node = Node::text_directive("cnt", DirectiveArgs::parse("", r#"name="eq" reset=3"#));
    /// let reference = Reference::from_node(&node, "cnt").unwrap();
    /// assert_eq!(reference.name, "eq");
    /// assert_eq!(reference.intent, Intent::Reset(3));
    /// ```
    #[must_use]
    pub fn from_node(node: &Node, directive: &str) -> Option<Self> {
        let Node::TextDirective { name, args } = node else {
            return None;
        };
        if name != directive {
            return None;
        }
        let counter = args.get("name").filter(|name| !name.is_empty())?;
        Some(Self {
            name: counter.to_owned(),
            intent: Intent::from_args(args),
        })
    }

    /// Whether the directive names a counter and nothing else.
    ///
    /// Only such references define counters inside a `reset` or `increment`
    /// container.
    #[must_use]
    pub fn is_definition(&self) -> bool {
        self.intent == Intent::Bare
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(attrs: &str) -> Node {
        Node::text_directive("cnt", DirectiveArgs::parse("", attrs))
    }

    fn intent(attrs: &str) -> Intent {
        Intent::from_args(&DirectiveArgs::parse("", attrs))
    }

    #[test]
    fn test_intent_from_args() {
        assert_eq!(intent("reset"), Intent::Reset(0));
        assert_eq!(intent("reset=5"), Intent::Reset(5));
        assert_eq!(intent(r#"reset="2.9""#), Intent::Reset(2));
        assert_eq!(intent("reset=abc"), Intent::Reset(0));
        assert_eq!(intent("up"), Intent::Up);
        assert_eq!(intent("look"), Intent::Look);
        assert_eq!(intent(""), Intent::Bare);
        assert_eq!(intent("other=1"), Intent::Bare);
    }

    #[test]
    fn test_intent_precedence() {
        assert_eq!(intent("look up reset=4"), Intent::Reset(4));
        assert_eq!(intent("look up"), Intent::Up);
    }

    #[test]
    fn test_from_node() {
        assert_eq!(
            Reference::from_node(&directive(r#"name="fig" up"#), "cnt"),
            Some(Reference {
                name: "fig".to_owned(),
                intent: Intent::Up,
            })
        );
    }

    #[test]
    fn test_from_node_requires_name() {
        assert_eq!(Reference::from_node(&directive("up"), "cnt"), None);
        assert_eq!(Reference::from_node(&directive(r#"name="" up"#), "cnt"), None);
    }

    #[test]
    fn test_from_node_other_directive() {
        let node = Node::text_directive("abbr", DirectiveArgs::parse("", r#"name="fig""#));
        assert_eq!(Reference::from_node(&node, "cnt"), None);
        assert_eq!(
            Reference::from_node(&node, "abbr").map(|r| r.name),
            Some("fig".to_owned())
        );
        assert_eq!(Reference::from_node(&Node::markup(":cnt"), "cnt"), None);
    }

    #[test]
    fn test_is_definition() {
        let bare = Reference::from_node(&directive(r#"name="a""#), "cnt").unwrap();
        let look = Reference::from_node(&directive(r#"name="a" look"#), "cnt").unwrap();
        assert!(bare.is_definition());
        assert!(!look.is_definition());
    }
}
