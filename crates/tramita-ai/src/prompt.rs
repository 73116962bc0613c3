//! Prompt templates and publication rendering
//!
//! Two templates on purpose: the hosted model gets the short
//! executive-analyst briefing, the local model gets the longer
//! step-by-step one. Both demand a JSON-only answer; the extraction
//! cascade copes when the model ignores that.

use tramita_comunica::Publication;

const PLACEHOLDER: &str = "{publicacoes}";

/// Body text is capped before prompting so one verbose gazette entry
/// cannot crowd out the others.
const BODY_LIMIT: usize = 1500;

pub(crate) const GEMINI_PROMPT: &str = r#"Atue como um Analista Jurídico Sênior focado em relatórios executivos para clientes.
Sua tarefa é analisar as publicações do Diário de Justiça e extrair a informação crucial para uma planilha de acompanhamento.

PUBLICAÇÕES (Contexto da mais recente para a mais antiga):
{publicacoes}

DIRETRIZES OBRIGATÓRIAS PARA O CAMPO 'RESUMO':
1. NÃO inicie com frases genéricas ("Trata-se de...", "O processo refere-se a...", "Foi publicada decisão...").
2. Vá direto à decisão/ato: [O QUE O JUIZ DECIDIU] + [CONSEQUÊNCIA PRÁTICA].
3. SEMPRE inclua, se disponíveis:
   - Valores monetários mencionados (dívida, custas, honorários, multas)
   - Prazos específicos (X dias para fazer Y)
4. Traduza o "juridiquês" para linguagem de negócios. (Ex: Troque "Deferida a dilação de prazo" por "Juiz concedeu mais tempo").
5. Se a publicação for apenas despacho administrativo (ex: "Junte-se", "Intime-se"), consulte publicações anteriores para contextualizar SOBRE O QUÊ é a intimação.
6. NUNCA termine o resumo com "o teor não foi disponibilizado" ou similar - extraia o máximo de informação possível do que ESTÁ disponível.

RESPONDA em formato JSON:
{
    "resumo": "Texto objetivo (máx 600 caracteres). Exemplo: 'Juiz condenou Empresa ABC a pagar R$ 15.000 + honorários de 10%. Prazo de 15 dias para pagamento voluntário sob pena de multa de 10%.'",
    "situacao": "Uma tag: PROVAS, ARQUIVADO, ACORDO, SENTENCA, RECURSAL ou NORMAL",
    "prazo": "Se houver prazo correndo, qual é (ex: '15 dias para manifestação'). Se não, null",
    "proxima_acao": "O que o advogado deve fazer, se houver (ex: 'Protocolar recurso até 02/03/2026'). Se não, null"
}

Responda APENAS o JSON, sem explicações."#;

pub(crate) const OLLAMA_PROMPT: &str = r#"Você é um assistente jurídico especializado em análise de publicações do Diário de Justiça.

Sua tarefa é analisar as publicações de um processo judicial e fornecer um resumo objetivo.

REGRAS IMPORTANTES:
1. Seja CONCISO - máximo 3 frases no resumo
2. Identifique se há PRAZO correndo para o advogado
3. Identifique se há AUDIÊNCIA marcada
4. Classifique a situação: URGENTE, AGUARDANDO, ARQUIVADO, ACORDO, SENTENCA, ou NORMAL
5. Responda APENAS em formato JSON válido
6. NÃO invente informações que não estão nas publicações

PUBLICAÇÕES DO PROCESSO (da mais recente para a mais antiga):

{publicacoes}

---

Agora analise e responda EXATAMENTE neste formato JSON (sem texto antes ou depois):

{
    "resumo": "Escreva aqui um resumo de 3 frases do status atual",
    "situacao": "URGENTE ou AGUARDANDO ou ARQUIVADO ou ACORDO ou SENTENCA ou NORMAL",
    "prazo": "Descreva o prazo se houver, ou null se não houver",
    "proxima_acao": "O que fazer se necessário, ou null"
}

JSON:"#;

/// Fill a prompt template with the rendered publications.
pub(crate) fn build_prompt(template: &str, publications: &[Publication]) -> String {
    template.replace(PLACEHOLDER, &render_publications(publications))
}

/// Render publications as numbered blocks, newest first, each with its
/// date, type, organ and cleaned body.
pub(crate) fn render_publications(publications: &[Publication]) -> String {
    let mut blocks = Vec::with_capacity(publications.len());

    for (idx, publication) in publications.iter().enumerate() {
        let mut body = publication.clean_text();
        if body.chars().count() > BODY_LIMIT {
            body = body.chars().take(BODY_LIMIT).collect();
            body.push_str("...");
        }

        blocks.push(format!(
            "[{}] Data: {}\nTipo: {}\nÓrgão: {}\nTeor: {}\n",
            idx + 1,
            publication.formatted_date(),
            publication.communication_type,
            publication.organ,
            body
        ));
    }

    blocks.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(text: &str) -> Publication {
        Publication {
            id: 9,
            available_on: "2024-05-20".to_string(),
            communication_type: "Intimação".to_string(),
            court: "TJRJ".to_string(),
            organ: "7ª Vara Cível".to_string(),
            case_class: "Cumprimento de Sentença".to_string(),
            text: text.to_string(),
            case_number: "0000001-23.2024.8.19.0001".to_string(),
            medium: "Diário".to_string(),
            hash: "h".to_string(),
            lawyers: vec![],
            recipients: vec![],
        }
    }

    #[test]
    fn renders_numbered_blocks() {
        let rendered = render_publications(&[
            publication("<p>Primeira</p>"),
            publication("<p>Segunda</p>"),
        ]);
        assert!(rendered.contains("[1] Data: 20/05/2024"));
        assert!(rendered.contains("Teor: Primeira"));
        assert!(rendered.contains("[2] Data: 20/05/2024"));
        assert!(rendered.contains("Órgão: 7ª Vara Cível"));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let long = "x".repeat(4000);
        let rendered = render_publications(&[publication(&long)]);
        assert!(rendered.contains(&("x".repeat(1500) + "...")));
        assert!(!rendered.contains(&"x".repeat(1501)));
    }

    #[test]
    fn templates_embed_the_publications() {
        let filled = build_prompt(GEMINI_PROMPT, &[publication("<p>Teor aqui</p>")]);
        assert!(!filled.contains(PLACEHOLDER));
        assert!(filled.contains("Teor aqui"));

        let filled = build_prompt(OLLAMA_PROMPT, &[publication("<p>Teor aqui</p>")]);
        assert!(!filled.contains(PLACEHOLDER));
        assert!(filled.contains("Teor aqui"));
    }
}
