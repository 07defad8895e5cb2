use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::Fault;

/// Render the single log line for a caught fault:
///
/// `[custom_msg:{label}] [msg:{message}] [file:{file}:{line}] [{key}:{value}]...`
///
/// The label segment is dropped when `label` is empty. Data entries follow in
/// insertion order.
pub(crate) fn format_message(label: &str, fault: &Fault, data: &Map<String, Value>) -> String {
    let mut message = String::new();

    if !label.is_empty() {
        message.push_str(&format!("[custom_msg:{label}] "));
    }

    message.push_str(&format!("[msg:{}] ", fault.message()));
    message.push_str(&format!("[file:{}:{}]", fault.file(), fault.line()));

    for (key, value) in data {
        message.push_str(&format!(" [{key}:{}]", render_value(value)));
    }

    message
}

/// Strings go in raw, null is empty, everything else is compact JSON.
fn render_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn full_line() {
        let fault = Fault::with_location("divide by zero", "calc", 42);
        let line = format_message(
            "billing calc failed",
            &fault,
            &data(json!({ "invoiceId": "123" })),
        );
        assert_eq!(
            line,
            "[custom_msg:billing calc failed] [msg:divide by zero] [file:calc:42] [invoiceId:123]"
        );
    }

    #[test]
    fn empty_label_is_omitted() {
        let fault = Fault::with_location("boom", "a.rs", 1);
        assert_eq!(format_message("", &fault, &Map::new()), "[msg:boom] [file:a.rs:1]");
    }

    #[test]
    fn data_keeps_insertion_order() {
        let mut map = Map::new();
        map.insert("zeta".into(), json!(1));
        map.insert("alpha".into(), json!(true));
        map.insert("mid".into(), Value::Null);
        map.insert("list".into(), json!([1, "x"]));

        let fault = Fault::with_location("boom", "a.rs", 1);
        assert_eq!(
            format_message("", &fault, &map),
            r#"[msg:boom] [file:a.rs:1] [zeta:1] [alpha:true] [mid:] [list:[1,"x"]]"#
        );
    }
}
