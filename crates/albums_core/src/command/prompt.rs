//! Interactive collection of a new album from a line-oriented stream.
//!
//! # Invariants
//! - Fields are read in fixed order: title, artist, price.
//! - Each field goes through its named `AlbumDraft` setter.
//! - No retry: the first failure aborts collection.

use super::{CommandError, CommandResult};
use crate::model::album::{AlbumDraft, AlbumField, NewAlbum};
use log::debug;
use std::io::{BufRead, Write};

/// Prompts on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Collects one album with `id` unset.
    ///
    /// # Errors
    /// - `CommandError::Input` when writing a prompt or reading a line fails,
    ///   including end of stream before all three fields were read.
    /// - `CommandError::Parse` when the price is not a finite floating-point
    ///   number.
    pub fn prompt_new_album(&mut self) -> CommandResult<NewAlbum> {
        let mut draft = AlbumDraft::new();

        draft.title(self.ask(AlbumField::Title)?);
        draft.artist(self.ask(AlbumField::Artist)?);

        let price_text = self.ask(AlbumField::Price)?;
        draft.price(parse_price(&price_text)?);

        let album = draft
            .build()
            .map_err(|err| CommandError::Input(err.to_string()))?;
        debug!("event=album_prompt module=command status=ok");
        Ok(album)
    }

    fn ask(&mut self, field: AlbumField) -> CommandResult<String> {
        write!(self.output, "Please enter the albums {field}: ")
            .and_then(|()| self.output.flush())
            .map_err(|err| {
                CommandError::Input(format!("failed to prompt for album {field}: {err}"))
            })?;

        read_line(&mut self.input)
            .map_err(|err| CommandError::Input(format!("failed to read album {field}: {err}")))?
            .ok_or_else(|| {
                CommandError::Input(format!("input ended before album {field} was entered"))
            })
    }
}

/// Parses a prompted price. NaN and infinities are rejected since the store
/// cannot hold them as ordinary `REAL` values.
fn parse_price(text: &str) -> CommandResult<f64> {
    let price = text
        .trim()
        .parse::<f64>()
        .map_err(|err| CommandError::Parse(format!("invalid album price `{text}`: {err}")))?;
    if !price.is_finite() {
        return Err(CommandError::Parse(format!(
            "album price must be a finite number, got `{text}`"
        )));
    }
    Ok(price)
}

/// Reads one line without its terminator. `Ok(None)` at end of stream.
pub fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(strip_line_terminator(&line).to_string()))
}

pub(crate) fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::{parse_price, strip_line_terminator, Prompter};
    use crate::command::CommandError;
    use crate::model::album::NewAlbum;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn collects_fields_in_order_and_writes_prompts() {
        let mut output: Vec<u8> = Vec::new();
        let input = Cursor::new(b"A Love Supreme\nJohn Coltrane\n49.99\n".to_vec());
        let album = Prompter::new(input, &mut output).prompt_new_album().unwrap();
        assert_eq!(album, NewAlbum::new("A Love Supreme", "John Coltrane", 49.99));

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Please enter the albums title: Please enter the albums artist: Please enter the albums price: "
        );
    }

    #[test]
    fn accepts_crlf_and_missing_final_newline() {
        let mut prompter = prompter("Blue Train\r\nJohn Coltrane\r\n56.99");
        let album = prompter.prompt_new_album().unwrap();
        assert_eq!(album, NewAlbum::new("Blue Train", "John Coltrane", 56.99));
    }

    #[test]
    fn keeps_inner_whitespace_of_text_fields() {
        let mut prompter = prompter("  Giant  Steps \nJohn Coltrane\n 63.99 \n");
        let album = prompter.prompt_new_album().unwrap();
        assert_eq!(album.title, "  Giant  Steps ");
        assert_eq!(album.price, 63.99);
    }

    #[test]
    fn malformed_price_is_parse_error() {
        let mut prompter = prompter("Blue Train\nJohn Coltrane\ncheap\n");
        let err = prompter.prompt_new_album().unwrap_err();
        assert!(matches!(err, CommandError::Parse(message) if message.contains("cheap")));
    }

    #[test]
    fn non_finite_price_is_parse_error() {
        for text in ["NaN", "inf", "-infinity"] {
            let mut prompter = prompter(&format!("Blue Train\nJohn Coltrane\n{text}\n"));
            let err = prompter.prompt_new_album().unwrap_err();
            assert!(
                matches!(err, CommandError::Parse(ref message) if message.contains("finite")),
                "`{text}` should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn parse_price_trims_surrounding_whitespace() {
        assert_eq!(parse_price(" 0 ").unwrap(), 0.0);
        assert!(parse_price("").is_err());
    }

    #[test]
    fn end_of_stream_is_input_error_naming_the_field() {
        let mut prompter = prompter("Blue Train\n");
        let err = prompter.prompt_new_album().unwrap_err();
        assert!(matches!(err, CommandError::Input(message) if message.contains("artist")));
    }

    #[test]
    fn strip_line_terminator_only_removes_line_endings() {
        assert_eq!(strip_line_terminator("get 1\r\n"), "get 1");
        assert_eq!(strip_line_terminator("get 1\n"), "get 1");
        assert_eq!(strip_line_terminator("get 1 "), "get 1 ");
    }
}
