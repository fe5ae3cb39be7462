use super::form::MortgageForm;
use super::report::TextReport;
use crate::application::estimator::Estimator;
use crate::error::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const SEPARATOR: &str = "----";

/// Line-driven form editing: every `<field> <value>` line updates the form
/// and prints a fresh estimate.
///
/// Recognised commands besides field updates are `show`, `help` and `quit`.
/// Unknown input prints an error line and the session carries on.
pub struct Session<R: BufRead, W: Write> {
    input: R,
    output: W,
    form: MortgageForm,
    estimator: Estimator,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_form(input, output, MortgageForm::default())
    }

    pub fn with_form(input: R, output: W, form: MortgageForm) -> Self {
        Self {
            input,
            output,
            form,
            estimator: Estimator::new(),
        }
    }

    /// Runs until `quit` or end of input and returns the final form.
    pub fn run(self) -> Result<MortgageForm> {
        let Self {
            input,
            mut output,
            mut form,
            mut estimator,
        } = self;

        write_panel(&mut output, &form, &mut estimator)?;

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            debug!(command, value = rest, "session input");

            match command.to_ascii_lowercase().as_str() {
                "quit" | "exit" => break,
                "help" => writeln!(
                    output,
                    "fields: {} (e.g. 'rate 5.25'); commands: show, help, quit",
                    MortgageForm::FIELDS.join(", ")
                )?,
                "show" => write_panel(&mut output, &form, &mut estimator)?,
                field => match form.set(field, rest) {
                    Ok(()) => write_panel(&mut output, &form, &mut estimator)?,
                    Err(e) => writeln!(output, "error: {e}")?,
                },
            }
        }

        output.flush()?;
        Ok(form)
    }
}

fn write_panel<W: Write>(
    output: &mut W,
    form: &MortgageForm,
    estimator: &mut Estimator,
) -> Result<()> {
    let estimate = estimator.estimate(&form.to_request());
    writeln!(output, "{}", TextReport::new(&estimate))?;
    writeln!(output, "{SEPARATOR}")?;
    Ok(())
}
