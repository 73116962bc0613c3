//! Publication records returned by the gazette API

use crate::html::strip_html;
use chrono::NaiveDate;
use serde::Deserialize;

/// One judicial-communication record for a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// API identifier
    pub id: u64,
    /// Availability date as sent by the API (ISO-ish, may be empty)
    pub available_on: String,
    /// Communication type (Intimação, Citação, Edital, ...)
    pub communication_type: String,
    /// Court abbreviation
    pub court: String,
    /// Issuing organ name
    pub organ: String,
    /// Procedural class name
    pub case_class: String,
    /// Raw body, usually an HTML fragment
    pub text: String,
    /// Case number, formatted or not
    pub case_number: String,
    /// Communication medium
    pub medium: String,
    /// Content hash assigned by the API
    pub hash: String,
    /// Lawyers addressed by the communication
    pub lawyers: Vec<Lawyer>,
    /// Parties addressed by the communication
    pub recipients: Vec<Recipient>,
}

/// A lawyer listed as addressee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lawyer {
    /// Full name
    pub name: String,
    /// OAB registration number
    pub oab: String,
    /// OAB state
    pub state: String,
}

/// A party listed as addressee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Party name
    pub name: String,
    /// Procedural pole (active/passive)
    pub pole: String,
}

impl Publication {
    /// Availability date as dd/mm/yyyy, falling back to the raw value,
    /// or `"???"` when the API sent nothing.
    pub fn formatted_date(&self) -> String {
        if let Some(prefix) = self.available_on.get(..10) {
            if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                return date.format("%d/%m/%Y").to_string();
            }
        }
        if self.available_on.is_empty() {
            "???".to_string()
        } else {
            self.available_on.clone()
        }
    }

    /// Body with HTML decoded, tags removed and whitespace collapsed.
    pub fn clean_text(&self) -> String {
        strip_html(&self.text)
    }
}

/// Response envelope of `GET /comunicacao`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    #[serde(default)]
    pub items: Vec<ApiItem>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// One item as the API ships it. Field naming is inconsistent between
/// API revisions, hence the aliases.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiItem {
    pub id: u64,
    #[serde(alias = "datadisponibilizacao")]
    pub data_disponibilizacao: String,
    #[serde(rename = "tipoComunicacao")]
    pub tipo_comunicacao: String,
    #[serde(rename = "siglaTribunal")]
    pub sigla_tribunal: String,
    #[serde(rename = "nomeOrgao")]
    pub nome_orgao: String,
    #[serde(rename = "nomeClasse")]
    pub nome_classe: String,
    pub texto: String,
    #[serde(alias = "numeroprocessocommascara")]
    pub numero_processo: String,
    pub meio: String,
    pub meiocompleto: Option<String>,
    pub hash: String,
    pub destinatarioadvogados: Vec<ApiLawyerEntry>,
    pub destinatarios: Vec<ApiRecipient>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiLawyerEntry {
    pub advogado: Option<ApiLawyer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiLawyer {
    pub nome: String,
    pub numero_oab: String,
    pub uf_oab: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiRecipient {
    pub nome: String,
    pub polo: String,
}

impl From<ApiItem> for Publication {
    fn from(item: ApiItem) -> Self {
        let lawyers = item
            .destinatarioadvogados
            .into_iter()
            .filter_map(|entry| entry.advogado)
            .map(|adv| Lawyer {
                name: adv.nome,
                oab: adv.numero_oab,
                state: adv.uf_oab,
            })
            .collect();

        let recipients = item
            .destinatarios
            .into_iter()
            .map(|dest| Recipient {
                name: dest.nome,
                pole: dest.polo,
            })
            .collect();

        Publication {
            id: item.id,
            available_on: item.data_disponibilizacao,
            communication_type: item.tipo_comunicacao,
            court: item.sigla_tribunal,
            organ: item.nome_orgao,
            case_class: item.nome_classe,
            text: item.texto,
            case_number: item.numero_processo,
            medium: item.meiocompleto.unwrap_or(item.meio),
            hash: item.hash,
            lawyers,
            recipients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(date: &str) -> Publication {
        Publication {
            id: 1,
            available_on: date.to_string(),
            communication_type: "Intimação".to_string(),
            court: "TJMS".to_string(),
            organ: "1ª Vara Cível".to_string(),
            case_class: "Execução de Título".to_string(),
            text: "<p>Vistos.&nbsp;Intime-se.</p>".to_string(),
            case_number: "0809090-86.2023.8.12.0021".to_string(),
            medium: "Diário".to_string(),
            hash: "abc".to_string(),
            lawyers: vec![],
            recipients: vec![],
        }
    }

    #[test]
    fn formats_iso_dates() {
        assert_eq!(publication("2024-03-08").formatted_date(), "08/03/2024");
        assert_eq!(
            publication("2024-03-08T00:00:00").formatted_date(),
            "08/03/2024"
        );
    }

    #[test]
    fn keeps_unparseable_dates_verbatim() {
        assert_eq!(publication("08/03/2024 x").formatted_date(), "08/03/2024 x");
        assert_eq!(publication("").formatted_date(), "???");
    }

    #[test]
    fn clean_text_strips_markup() {
        assert_eq!(publication("2024-01-01").clean_text(), "Vistos. Intime-se.");
    }

    #[test]
    fn envelope_decodes_both_field_spellings() {
        let body = r#"{
            "items": [{
                "id": 7,
                "datadisponibilizacao": "2024-02-01",
                "tipoComunicacao": "Intimação",
                "siglaTribunal": "TJSP",
                "nomeOrgao": "2ª Vara",
                "nomeClasse": "Procedimento Comum",
                "texto": "<b>Teor</b>",
                "numeroprocessocommascara": "1000000-11.2024.8.26.0100",
                "meio": "D",
                "meiocompleto": "Diário de Justiça Eletrônico Nacional",
                "hash": "h",
                "destinatarioadvogados": [
                    {"advogado": {"nome": "Fulano", "numero_oab": "12345", "uf_oab": "SP"}}
                ],
                "destinatarios": [{"nome": "Empresa X", "polo": "P"}]
            }],
            "count": 12
        }"#;

        let envelope: ApiEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.count, Some(12));

        let publication = Publication::from(envelope.items.into_iter().next().unwrap());
        assert_eq!(publication.available_on, "2024-02-01");
        assert_eq!(publication.case_number, "1000000-11.2024.8.26.0100");
        assert_eq!(publication.medium, "Diário de Justiça Eletrônico Nacional");
        assert_eq!(publication.lawyers.len(), 1);
        assert_eq!(publication.lawyers[0].oab, "12345");
        assert_eq!(publication.recipients[0].name, "Empresa X");
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let envelope: ApiEnvelope = serde_json::from_str(r#"{"items": [{"id": 1}]}"#).unwrap();
        let publication = Publication::from(envelope.items.into_iter().next().unwrap());
        assert_eq!(publication.id, 1);
        assert!(publication.text.is_empty());
        assert_eq!(publication.formatted_date(), "???");
    }
}
