use super::super::response::Response;
use super::normalizer::{clean_identifier, parse_answer};
use super::ResponseImportError;
use std::io::Read;
use tracing::trace;

const QUESTION_ID_COLUMN: &str = "question_id";
const ANSWER_COLUMN: &str = "answer";

pub(crate) fn parse_responses<R: Read>(reader: R) -> Result<Vec<Response>, ResponseImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| clean_identifier(header).to_ascii_lowercase())
        .collect();
    let question_column = column_index(&headers, QUESTION_ID_COLUMN)?;
    let answer_column = column_index(&headers, ANSWER_COLUMN)?;

    let mut responses = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let question_id = clean_identifier(record.get(question_column).unwrap_or_default());
        if question_id.is_empty() {
            trace!(row = row + 1, "skipping row without question id");
            continue;
        }

        let answer = parse_answer(record.get(answer_column).unwrap_or_default());
        responses.push(Response {
            question_id,
            answer,
        });
    }

    Ok(responses)
}

fn column_index(headers: &[String], column: &'static str) -> Result<usize, ResponseImportError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or(ResponseImportError::MissingColumn { column })
}
