//! Terminal rendering surface: a stdin/stdout `Prompt` implementation, table
//! printing with a selection marker, command parsing, and the interactive
//! loop. Only presentation lives here; every state change goes through
//! `Flows::dispatch`.

use std::io::{self, BufRead, Write};

use crate::controller::ListView;
use crate::flows::{Action, Flows};
use crate::forms::{FieldKind, FieldSpec, FormValues, Prompt, SelectOption};
use crate::gateway::{ApiGateway, ClinicApi};

/// Typing this alone at any form field cancels the whole form.
const CANCEL_TOKEN: &str = ":q";

/// Console commands: flow actions plus the two console-only verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    Help,
    Quit,
}

/// Maps one input line to a command. `None` for anything unrecognized.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;
    let id: Option<i64> = parts.next().and_then(|raw| raw.parse().ok());

    let action = match verb {
        "rp" => Action::RefreshPatients,
        "ap" => Action::AddPatient,
        "ep" => Action::EditPatient,
        "dp" => Action::DeletePatient,
        "sp" => Action::SelectPatient(id?),
        "ra" => Action::RefreshAppointments,
        "aa" => Action::AddAppointment,
        "da" => Action::DeleteAppointment,
        "sa" => Action::SelectAppointment(id?),
        "dx" => Action::PredictDiagnosis,
        "h" | "help" => return Some(Command::Help),
        "q" | "quit" | "exit" => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Act(action))
}

const HELP_TEXT: &str = "\
Patients:      rp refresh | ap add | ep edit | dp delete | sp <id> select
Appointments:  ra refresh | aa add | da delete | sa <id> select
Diagnosis:     dx predict from symptom checklist
Console:       h help | q quit";

/// Interactive prompt over arbitrary input/output streams; the binary wires
/// it to stdin/stdout.
pub struct TermPrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl TermPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TermPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{text}");
    }

    /// One raw line for the command loop. `None` on EOF.
    pub fn read_command_line(&mut self) -> Option<String> {
        let _ = write!(self.output, "doctrack> ");
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// One form entry. `None` cancels (EOF or the cancel token).
    fn read_entry(&mut self) -> Option<String> {
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let entry = line.trim();
                if entry == CANCEL_TOKEN {
                    None
                } else {
                    Some(entry.to_string())
                }
            }
        }
    }

    fn ask_text(&mut self, field: &FieldSpec) -> Option<String> {
        match &field.initial_value {
            Some(initial) => {
                let _ = write!(
                    self.output,
                    "{} [enter keeps \"{initial}\"]: ",
                    field.label
                );
            }
            None if field.placeholder.is_empty() => {
                let _ = write!(self.output, "{}: ", field.label);
            }
            None => {
                let _ = write!(self.output, "{} ({}): ", field.label, field.placeholder);
            }
        }
        let entry = self.read_entry()?;
        if entry.is_empty() {
            if let Some(initial) = &field.initial_value {
                return Some(initial.clone());
            }
        }
        Some(entry)
    }

    fn ask_select(&mut self, field: &FieldSpec, options: &[SelectOption]) -> Option<String> {
        self.say(&format!("{}:", field.label));
        for (index, option) in options.iter().enumerate() {
            self.say(&format!("  {}. {}", index + 1, option.label));
        }
        let _ = write!(self.output, "Choice (1-{}): ", options.len());
        let entry = self.read_entry()?;
        let choice = entry
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i));
        // An unrecognized choice submits empty and fails required validation.
        Some(choice.map(|o| o.value.clone()).unwrap_or_default())
    }

    fn ask_checkbox(&mut self, field: &FieldSpec) -> Option<String> {
        let _ = write!(self.output, "{} [y/N]: ", field.label);
        let entry = self.read_entry()?;
        let checked = matches!(entry.to_lowercase().as_str(), "y" | "yes");
        Some(if checked { "1".into() } else { "0".into() })
    }
}

impl<R: BufRead, W: Write> Prompt for TermPrompt<R, W> {
    fn form(&mut self, title: &str, fields: &[FieldSpec]) -> Option<FormValues> {
        self.say(&format!("\n-- {title} (\"{CANCEL_TOKEN}\" cancels) --"));
        let mut values = FormValues::new();
        for field in fields {
            let entry = match &field.kind {
                FieldKind::Select(options) => self.ask_select(field, options)?,
                FieldKind::Checkbox => self.ask_checkbox(field)?,
                FieldKind::Text | FieldKind::Textarea | FieldKind::DateTime => {
                    self.ask_text(field)?
                }
            };
            values.insert(field.id.to_string(), entry);
        }
        Some(values)
    }

    fn confirm(&mut self, title: &str, text: &str) -> bool {
        let _ = write!(self.output, "\n{title}: {text} [y/N]: ");
        matches!(
            self.read_entry().as_deref().map(str::to_lowercase).as_deref(),
            Some("y") | Some("yes")
        )
    }

    fn info(&mut self, title: &str, text: &str) {
        self.say(&format!("[ok] {title}: {text}"));
    }

    fn error(&mut self, title: &str, text: &str) {
        self.say(&format!("[error] {title}: {text}"));
    }
}

/// Writes one list as an aligned table, or its placeholder. The selected row
/// carries a `>` marker.
pub fn write_list(title: &str, view: &ListView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n== {title} ==")?;
    match view {
        ListView::Placeholder(text) => writeln!(out, "  {text}"),
        ListView::Table { headers, rows } => {
            let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
            for row in rows {
                for (i, cell) in row.cells.iter().enumerate() {
                    widths[i] = widths[i].max(cell.len());
                }
            }

            let header_line: Vec<String> = headers
                .iter()
                .zip(widths.iter().copied())
                .map(|(h, w)| format!("{h:<w$}"))
                .collect();
            writeln!(out, "    {}", header_line.join("  "))?;

            for row in rows {
                let marker = if row.selected { '>' } else { ' ' };
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .zip(widths.iter().copied())
                    .map(|(c, w)| format!("{c:<w$}"))
                    .collect();
                writeln!(out, "  {marker} {}", cells.join("  "))?;
            }
            Ok(())
        }
    }
}

/// Renders both lists, the selection hints, and the last diagnosis.
pub fn write_dashboard<A: ClinicApi, P: Prompt>(
    flows: &Flows<A, P>,
    out: &mut impl Write,
) -> io::Result<()> {
    write_list("Patients", &flows.patients.view(), out)?;
    match flows.patients.selected() {
        Some(id) => writeln!(out, "  selected: #{id}")?,
        None => writeln!(out, "  no selection (ep/dp disabled)")?,
    }

    write_list("Appointments", &flows.appointments.view(), out)?;
    match flows.appointments.selected() {
        Some(id) => writeln!(out, "  selected: #{id}")?,
        None => writeln!(out, "  no selection (da disabled)")?,
    }

    if let Some(result) = &flows.last_diagnosis {
        writeln!(out, "\nLast diagnosis: {} (code {})", result.diagnosis, result.code)?;
    }
    writeln!(out)
}

/// The interactive session: initial load of both lists, then one command per
/// iteration until quit or EOF.
pub fn run(api_url: &str) -> io::Result<()> {
    let gateway = ApiGateway::new(api_url);
    let mut flows = Flows::new(gateway, TermPrompt::stdio());
    flows.startup();

    let mut out = io::stdout();
    writeln!(out, "{HELP_TEXT}")?;
    loop {
        write_dashboard(&flows, &mut out)?;
        let Some(line) = flows.prompt.read_command_line() else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(Command::Act(action)) => flows.dispatch(action),
            Some(Command::Help) => writeln!(out, "{HELP_TEXT}")?,
            Some(Command::Quit) => break,
            None => writeln!(out, "Unknown command \"{line}\". Type h for help.")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RowView;

    fn prompt(input: &str) -> TermPrompt<&[u8], Vec<u8>> {
        TermPrompt::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn command_tokens_map_to_actions() {
        assert_eq!(parse_command("rp"), Some(Command::Act(Action::RefreshPatients)));
        assert_eq!(parse_command("sp 3"), Some(Command::Act(Action::SelectPatient(3))));
        assert_eq!(parse_command("sa 12"), Some(Command::Act(Action::SelectAppointment(12))));
        assert_eq!(parse_command("dx"), Some(Command::Act(Action::PredictDiagnosis)));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("help"), Some(Command::Help));
    }

    #[test]
    fn select_without_id_is_not_a_command() {
        assert_eq!(parse_command("sp"), None);
        assert_eq!(parse_command("sp abc"), None);
        assert_eq!(parse_command("frobnicate"), None);
    }

    #[test]
    fn form_collects_one_value_per_field() {
        let fields = vec![
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("history", "History", FieldKind::Textarea),
        ];
        let values = prompt("Ana\nAsthma\n").form("Add patient", &fields).unwrap();
        assert_eq!(values["name"], "Ana");
        assert_eq!(values["history"], "Asthma");
    }

    #[test]
    fn cancel_token_aborts_the_whole_form() {
        let fields = vec![
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("history", "History", FieldKind::Textarea),
        ];
        assert!(prompt("Ana\n:q\n").form("Add patient", &fields).is_none());
    }

    #[test]
    fn empty_entry_keeps_the_initial_value() {
        let fields = vec![FieldSpec::new("name", "Name", FieldKind::Text).initial("Ana")];
        let values = prompt("\n").form("Edit patient", &fields).unwrap();
        assert_eq!(values["name"], "Ana");
    }

    #[test]
    fn checkbox_maps_to_zero_or_one() {
        let fields = vec![
            FieldSpec::new("fever", "Fever", FieldKind::Checkbox),
            FieldSpec::new("cough", "Cough", FieldKind::Checkbox),
        ];
        let values = prompt("y\n\n").form("Checklist", &fields).unwrap();
        assert_eq!(values["fever"], "1");
        assert_eq!(values["cough"], "0");
    }

    #[test]
    fn select_resolves_choice_to_option_value() {
        let options = vec![
            SelectOption { value: "3".into(), label: "Ana (ID: 3)".into() },
            SelectOption { value: "5".into(), label: "Luis (ID: 5)".into() },
        ];
        let fields = vec![FieldSpec::new("patient", "Patient", FieldKind::Select(options))];
        let values = prompt("2\n").form("Add appointment", &fields).unwrap();
        assert_eq!(values["patient"], "5");
    }

    #[test]
    fn select_out_of_range_submits_empty() {
        let options = vec![SelectOption { value: "3".into(), label: "Ana".into() }];
        let fields = vec![FieldSpec::new("patient", "Patient", FieldKind::Select(options))];
        let values = prompt("9\n").form("Add appointment", &fields).unwrap();
        assert_eq!(values["patient"], "");
    }

    #[test]
    fn confirm_defaults_to_no() {
        assert!(!prompt("\n").confirm("Delete", "sure?"));
        assert!(!prompt("nope\n").confirm("Delete", "sure?"));
        assert!(prompt("y\n").confirm("Delete", "sure?"));
    }

    #[test]
    fn eof_during_form_cancels() {
        let fields = vec![FieldSpec::new("name", "Name", FieldKind::Text)];
        assert!(prompt("").form("Add patient", &fields).is_none());
    }

    #[test]
    fn table_marks_the_selected_row() {
        let view = ListView::Table {
            headers: &["ID", "Name"],
            rows: vec![
                RowView { id: 1, cells: vec!["1".into(), "Ana".into()], selected: false },
                RowView { id: 2, cells: vec!["2".into(), "Luis".into()], selected: true },
            ],
        };
        let mut out = Vec::new();
        write_list("Patients", &view, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("> 2"));
        assert!(text.contains("  1"));
    }

    #[test]
    fn placeholder_renders_instead_of_table() {
        let view = ListView::Placeholder("No patients registered".into());
        let mut out = Vec::new();
        write_list("Patients", &view, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No patients registered"));
    }
}
