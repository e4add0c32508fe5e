//! Prompt construction.

use relata_core::TabularDataset;

/// Fixed instruction sent ahead of the data. Asks for a single JSON object
/// with exactly the four report keys and nothing around it.
const INSTRUCTION: &str = r#"Você é um analista de dados de RH sênior. Sua tarefa é analisar os dados de uma planilha e retornar um objeto JSON com um relatório profissional e padronizado.

Estrutura do JSON:
{
    "titulo": "string com o título do relatório",
    "sumario_executivo": "string com HTML para um resumo de alto nível com as principais descobertas, elaborando em pelo menos dois parágrafos.",
    "analise_insights": "string com HTML para uma análise detalhada das principais tendências, correlações ou anomalias, elaborando em pelo menos três parágrafos.",
    "recomendacoes": "string com HTML para sugestões práticas e acionáveis, em formato de lista com pelo menos quatro itens."
}

Instruções e regras:
1. O output deve ser um único objeto JSON válido. Não inclua nenhum texto ou formatação fora do JSON.
2. Os valores das chaves devem ser strings que podem conter tags HTML como <p>, <ul> e <li>.
3. A análise deve ser de alto nível, focada em insights estratégicos úteis para um executivo.
4. Não inclua dados brutos, gráficos ou blocos de código.
5. O título deve ser relevante e profissional.
6. O JSON deve começar com '{' e terminar com '}'.

Dados da planilha para análise:
"#;

/// Build the full prompt for `dataset`.
#[must_use]
pub fn build_prompt(dataset: &TabularDataset) -> String {
    let table = dataset_to_text(dataset);
    let mut prompt = String::with_capacity(INSTRUCTION.len() + table.len());
    prompt.push_str(INSTRUCTION);
    prompt.push_str(&table);
    prompt
}

/// Render the dataset as a pipe-delimited text table.
#[must_use]
pub fn dataset_to_text(dataset: &TabularDataset) -> String {
    let mut out = String::new();

    push_line(&mut out, dataset.columns().iter().map(|c| text_cell(c)));
    push_line(&mut out, dataset.columns().iter().map(|_| String::from("---")));
    for row in dataset.rows() {
        push_line(&mut out, row.iter().map(|cell| text_cell(&cell.to_string())));
    }

    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&cell);
        out.push_str(" |");
    }
    out.push('\n');
}

/// Keep one cell on one line and out of the column separators.
fn text_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}
