//! User-supplied context appended to a failure report

use std::fmt::{self, Write};
use verity_core_types::Value;

/// Optional caller message
///
/// - `None`: no `Messages:` line
/// - `Literal`: used verbatim
/// - `Format`: a printf-style template with its arguments
#[derive(Debug, Clone, Default)]
pub enum Message {
    #[default]
    None,
    Literal(String),
    Format { template: String, args: Vec<Value> },
}

impl Message {
    pub fn literal(text: impl fmt::Display) -> Self {
        Message::Literal(text.to_string())
    }

    pub fn format(template: impl Into<String>, args: Vec<Value>) -> Self {
        Message::Format {
            template: template.into(),
            args,
        }
    }

    /// Rendered text; empty for `None`
    pub fn render(&self) -> String {
        match self {
            Message::None => String::new(),
            Message::Literal(text) => text.clone(),
            Message::Format { template, args } => sprintf(template, args),
        }
    }
}

impl From<()> for Message {
    fn from(_: ()) -> Self {
        Message::None
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Literal(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Literal(text)
    }
}

impl From<fmt::Arguments<'_>> for Message {
    fn from(args: fmt::Arguments<'_>) -> Self {
        Message::Literal(args.to_string())
    }
}

/// Build a [`Message`].
///
/// ```
/// use verity_core::msg;
/// use verity_core::report::Message;
///
/// assert!(matches!(msg!(), Message::None));
/// assert_eq!(msg!("plain").render(), "plain");
/// assert_eq!(msg!("%s has %d items", "cart", 3).render(), "cart has 3 items");
/// ```
#[macro_export]
macro_rules! msg {
    () => {
        $crate::report::Message::None
    };
    ($text:expr $(,)?) => {
        $crate::report::Message::literal($text)
    };
    ($template:expr, $($arg:expr),+ $(,)?) => {
        $crate::report::Message::format(
            $template,
            vec![$($crate::types::Reflect::reflect(&$arg)),+],
        )
    };
}

/// printf-style formatting over [`Value`] arguments.
///
/// Verbs: `%v` `%s` `%d` `%f` `%t` `%q` `%#v` and `%%`. A verb applied to
/// the wrong kind of value renders as `%!d(String=abc)`, a verb with no
/// argument left as `%!d(MISSING)`, and unused arguments are listed in a
/// trailing `%!(EXTRA ...)`.
pub fn sprintf(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let (verb, sharp) = match chars.next() {
            None => {
                out.push_str("%!(NOVERB)");
                break;
            }
            Some('%') => {
                out.push('%');
                continue;
            }
            Some('#') => match chars.next() {
                Some(v) => (v, true),
                None => {
                    out.push_str("%!(NOVERB)");
                    break;
                }
            },
            Some(v) => (v, false),
        };
        match remaining.next() {
            Some(arg) => write_verb(&mut out, verb, sharp, arg),
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    let extra: Vec<String> = remaining.map(|v| format!("{}={}", v.type_name(), v)).collect();
    if !extra.is_empty() {
        let _ = write!(out, "%!(EXTRA {})", extra.join(", "));
    }
    out
}

fn write_verb(out: &mut String, verb: char, sharp: bool, arg: &Value) {
    let rendered = match (verb, arg) {
        ('v', v) if sharp => Some(v.typed().to_string()),
        ('v', v) => Some(v.to_string()),
        ('s', Value::Str(s)) => Some(s.clone()),
        ('d', Value::Int(n, _)) => Some(n.to_string()),
        ('d', Value::Uint(n, _)) => Some(n.to_string()),
        ('f', Value::Float(x, _)) => Some(format!("{:.6}", x)),
        ('t', Value::Bool(b)) => Some(b.to_string()),
        ('q', Value::Str(s)) => Some(format!("{:?}", s)),
        _ => None,
    };
    match rendered {
        Some(text) => out.push_str(&text),
        None => {
            let _ = write!(out, "%!{}({}={})", verb, arg.type_name(), arg);
        }
    }
}
