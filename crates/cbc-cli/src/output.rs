use cbc_core::{Notification, Notifier};
use serde::Serialize;

/// JSON envelope for `--json` output.
#[derive(Debug, Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn print_ok<T: Serialize>(data: T) -> anyhow::Result<()> {
    let out = JsonOut {
        ok: true,
        data: Some(data),
        error: None,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub fn print_err<T: Serialize>(data: Option<T>, error: &str) -> anyhow::Result<()> {
    let out = JsonOut {
        ok: false,
        data,
        error: Some(error.to_string()),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// One-line toast text.
pub fn toast_line(n: &Notification) -> String {
    let mark = if n.is_destructive() { "✘" } else { "✔" };
    format!("{} {}: {}", mark, n.title, n.description)
}

/// Prints notifications to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", toast_line(&notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_line_marks_variant() {
        let line = toast_line(&Notification::invalid_cpf());
        assert!(line.starts_with('✘'));
        assert!(line.contains("CPF Inválido"));

        let cpf = cbc_core::Cpf::parse("11144477735").unwrap();
        let line = toast_line(&Notification::search_succeeded(&cpf));
        assert!(line.starts_with('✔'));
    }

    #[test]
    fn test_json_envelope_skips_empty_fields() {
        let out: JsonOut<u8> = JsonOut {
            ok: false,
            data: None,
            error: Some("boom".to_string()),
        };
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["ok"], false);
        assert!(v.get("data").is_none());
        assert_eq!(v["error"], "boom");
    }
}
