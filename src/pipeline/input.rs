// src/pipeline/input.rs
use crate::error::InputError;
use crate::types::{SalesEntry, ITEM_COUNT};
use anyhow::{bail, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

pub const PROMPT: &str = "Enter your data here: ";

const INSTRUCTIONS: &str = "Please enter sales data from the last market.\n\
Data should be six numbers, separated by commas.\n\
Example: 10,20,30,40,50,60\n\n";

/// Parses one line of operator input into a sales entry.
///
/// Every token is converted before the count is checked, so a bad token is
/// reported even when the count is also wrong.
pub fn validate_data(line: &str) -> Result<SalesEntry, InputError> {
    let values = line
        .trim_end_matches(['\r', '\n'])
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<i64>()
                .map_err(|_| InputError::NotAnInteger(token.to_string()))
        })
        .collect::<Result<Vec<i64>, InputError>>()?;

    let row: [i64; ITEM_COUNT] = values
        .as_slice()
        .try_into()
        .map_err(|_| InputError::WrongCount {
            expected: ITEM_COUNT,
            provided: values.len(),
        })?;

    Ok(SalesEntry(row))
}

/// Prompts until the operator enters a valid sales row.
///
/// There is no retry limit; only a closed input stream ends the loop early.
pub async fn collect_sales_data<R, W>(reader: &mut R, writer: &mut W) -> Result<SalesEntry>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        writer.write_all(INSTRUCTIONS.as_bytes()).await?;
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            bail!("input closed before valid sales data was entered");
        }

        match validate_data(&line) {
            Ok(entry) => {
                writer.write_all(b"Data is valid!\n").await?;
                writer.flush().await?;
                info!("Accepted sales data {:?} after {} attempt(s)", entry.0, attempt);
                return Ok(entry);
            }
            Err(e) => {
                warn!("Rejected sales input {:?}: {}", line.trim_end(), e);
                writer
                    .write_all(format!("Invalid data: {}, please try again.\n\n", e).as_bytes())
                    .await?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_integers_are_accepted_in_order() {
        assert_eq!(
            validate_data("10,20,30,40,50,60"),
            Ok(SalesEntry([10, 20, 30, 40, 50, 60]))
        );
        assert_eq!(
            validate_data(" 1, -2 ,+3,0,5 ,6\n"),
            Ok(SalesEntry([1, -2, 3, 0, 5, 6]))
        );
    }

    #[test]
    fn wrong_count_is_rejected() {
        assert_eq!(
            validate_data("1,2,3"),
            Err(InputError::WrongCount {
                expected: 6,
                provided: 3
            })
        );
        assert_eq!(
            validate_data("1,2,3,4,5,6,7"),
            Err(InputError::WrongCount {
                expected: 6,
                provided: 7
            })
        );
    }

    #[test]
    fn non_numeric_token_is_rejected_before_count() {
        assert_eq!(
            validate_data("1,2,x"),
            Err(InputError::NotAnInteger("x".to_string()))
        );
        assert_eq!(
            validate_data("1,2,3,4,5,6.5"),
            Err(InputError::NotAnInteger("6.5".to_string()))
        );
        assert_eq!(validate_data(""), Err(InputError::NotAnInteger(String::new())));
        assert_eq!(
            validate_data("1,2,,4,5,6"),
            Err(InputError::NotAnInteger(String::new()))
        );
    }

    #[test]
    fn count_message_matches_operator_wording() {
        let err = validate_data("1,2,3").unwrap_err();
        assert_eq!(err.to_string(), "Exactly 6 values required, you provided 3");
    }

    #[tokio::test]
    async fn reprompts_until_valid() {
        let mut input: &[u8] = b"1,2,3\nten,20,30,40,50,60\n10,20,30,40,50,60\n";
        let mut output = Vec::new();

        let entry = collect_sales_data(&mut input, &mut output).await.unwrap();
        assert_eq!(entry, SalesEntry([10, 20, 30, 40, 50, 60]));

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches(PROMPT).count(), 3);
        assert!(text.contains(
            "Invalid data: Exactly 6 values required, you provided 3, please try again."
        ));
        assert!(text.contains("Invalid data: invalid literal for an integer: 'ten'"));
        assert!(text.ends_with("Data is valid!\n"));
    }

    #[tokio::test]
    async fn closed_input_stops_the_loop() {
        let mut input: &[u8] = b"1,2,3\n";
        let mut output = Vec::new();

        let result = collect_sales_data(&mut input, &mut output).await;
        assert!(result.is_err());
        assert_eq!(
            String::from_utf8(output).unwrap().matches(PROMPT).count(),
            2
        );
    }
}
