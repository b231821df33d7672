//! Plain-text rendering of search results.
//!
//! Pure functions: a record becomes grouped sections (identity, dates,
//! location, other documents), optional groups and lines only appear when
//! their data is present. Dates use the pt-BR `dd/mm/yyyy` form.

use cbc_registry::CitizenRecord;
use chrono::{DateTime, NaiveDate, Utc};

use crate::session::SearchState;

const LABEL_WIDTH: usize = 20;

/// pt-BR short date (`15/03/2010`).
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn format_timestamp_br(ts: &DateTime<Utc>) -> String {
    format_date_br(ts.date_naive())
}

fn push_field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {:<width$} {}\n", format!("{label}:"), value, width = LABEL_WIDTH));
}

/// Render a found record.
pub fn render_record(record: &CitizenRecord) -> String {
    let mut out = String::new();
    out.push_str("✔ Dados do CPF\n");
    out.push_str("Informações obtidas do Cadastro Base do Cidadão\n\n");

    out.push_str("Informações Pessoais\n");
    push_field(&mut out, "CPF", &record.cpf.formatted());
    push_field(&mut out, "Situação", record.status.as_str());
    push_field(&mut out, "Nome", &record.name);
    if let Some(full) = record.distinct_full_name() {
        push_field(&mut out, "Nome Completo", full);
    }

    out.push_str("\nDatas\n");
    push_field(&mut out, "Data de Nascimento", &format_date_br(record.birth_date));
    push_field(&mut out, "Data de Inscrição", &format_timestamp_br(&record.registered_at));

    if record.has_location() {
        out.push_str("\nLocalização\n");
        if let Some(city) = &record.city {
            push_field(&mut out, "Município", city);
        }
        if let Some(uf) = &record.state {
            push_field(&mut out, "UF", uf);
        }
    }

    if record.has_other_documents() {
        out.push_str("\nOutros Documentos\n");
        if let Some(rg) = &record.rg {
            push_field(&mut out, "RG", rg);
        }
        if let Some(title) = &record.voter_title {
            push_field(&mut out, "Título de Eleitor", title);
        }
        if let Some(pis) = &record.pis {
            push_field(&mut out, "PIS", pis);
        }
    }

    out
}

/// Render the error panel.
pub fn render_error(message: &str) -> String {
    format!("✘ Erro na Consulta\n{message}\n")
}

/// Render whatever the session currently holds.
pub fn render_state(state: &SearchState) -> String {
    match state {
        SearchState::Idle => String::new(),
        SearchState::Pending { .. } => "Consultando...\n".to_string(),
        SearchState::Resolved(record) => render_record(record),
        SearchState::Rejected(failure) => render_error(&failure.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbc_registry::{Cpf, RegistrationStatus, SourceError};
    use chrono::TimeZone;

    use crate::session::QueryFailure;

    fn bare_record() -> CitizenRecord {
        CitizenRecord::new(
            Cpf::parse("11144477735").unwrap(),
            "Carlos Eduardo Almeida",
            RegistrationStatus::Suspenso,
            Utc.with_ymd_and_hms(2010, 3, 15, 0, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(1955, 2, 1).unwrap(),
        )
    }

    #[test]
    fn test_date_format() {
        let d = NaiveDate::from_ymd_opt(1984, 7, 9).unwrap();
        assert_eq!(format_date_br(d), "09/07/1984");
    }

    #[test]
    fn test_bare_record_hides_optional_groups() {
        let text = render_record(&bare_record());
        assert!(text.contains("Informações Pessoais"));
        assert!(text.contains("111.444.777-35"));
        assert!(text.contains("SUSPENSO"));
        assert!(text.contains("Carlos Eduardo Almeida"));
        assert!(text.contains("01/02/1955"));
        assert!(text.contains("15/03/2010"));
        assert!(!text.contains("Nome Completo"));
        assert!(!text.contains("Localização"));
        assert!(!text.contains("Outros Documentos"));
    }

    #[test]
    fn test_partial_location_and_documents() {
        let mut record = bare_record();
        record.state = Some("PR".to_string());
        record.pis = Some("12345678901".to_string());

        let text = render_record(&record);
        assert!(text.contains("Localização"));
        assert!(text.contains("UF:"));
        assert!(!text.contains("Município"));
        assert!(text.contains("Outros Documentos"));
        assert!(text.contains("PIS:"));
        assert!(!text.contains("RG:"));
        assert!(!text.contains("Título de Eleitor"));
    }

    #[test]
    fn test_full_name_only_when_distinct() {
        let mut record = bare_record();
        record.full_name = Some(record.name.clone());
        assert!(!render_record(&record).contains("Nome Completo"));

        record.full_name = Some("Carlos Eduardo Almeida Neto".to_string());
        assert!(render_record(&record).contains("Carlos Eduardo Almeida Neto"));
    }

    #[test]
    fn test_render_state_variants() {
        assert_eq!(render_state(&SearchState::Idle), "");
        assert!(render_state(&SearchState::Pending {
            query_id: uuid::Uuid::new_v4()
        })
        .contains("Consultando"));

        let failure = QueryFailure::from(&SourceError::NotFound);
        let text = render_state(&SearchState::Rejected(failure));
        assert!(text.contains("Erro na Consulta"));
        assert!(text.contains("CPF não encontrado na base de dados"));
    }
}
