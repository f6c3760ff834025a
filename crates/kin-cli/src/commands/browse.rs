//! Line-oriented session: one command per line, one JSON view per transition.

use super::emit;
use crate::nav::{NavAction, Page};
use crate::state::Session;
use crate::views;
use std::io::{BufRead, Write};
use tracing::{debug, info};

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Open(String),
    Track(Option<String>),
    Untrack(Option<String>),
    Mine,
    Back,
    Home,
    Search(String),
    Category(Option<String>),
    Reload,
    Quit,
}

fn parse(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match word {
        "open" => arg.map(Input::Open).ok_or_else(|| "usage: open <doc_id>".to_string()),
        "track" => Ok(Input::Track(arg)),
        "untrack" => Ok(Input::Untrack(arg)),
        "mine" => Ok(Input::Mine),
        "back" => Ok(Input::Back),
        "home" => Ok(Input::Home),
        "search" => Ok(Input::Search(rest.to_string())),
        "category" => Ok(Input::Category(arg)),
        "reload" => Ok(Input::Reload),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(format!("unknown command: {other}")),
    }
}

/// Drive the session from `input` until `quit` or end of input.
///
/// Command errors are written as `{"error": ...}` and the loop continues;
/// only I/O and rendering failures end it.
pub fn run_browse<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    pretty: bool,
) -> anyhow::Result<()> {
    emit(&views::render(session)?, pretty, out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse(&line) {
            Ok(Input::Quit) => break,
            Ok(command) => command,
            Err(message) => {
                emit(&serde_json::json!({ "error": message }), pretty, out)?;
                continue;
            }
        };
        debug!(?command, "browse");

        match apply(session, command) {
            Ok(()) => emit(&views::render(session)?, pretty, out)?,
            Err(message) => emit(&serde_json::json!({ "error": message }), pretty, out)?,
        }
    }

    info!("browse session ended");
    Ok(())
}

fn apply(session: &mut Session, command: Input) -> Result<(), String> {
    let navigated = match command {
        Input::Open(doc_id) => session.navigate(NavAction::OpenDetail(doc_id)).map(drop),
        Input::Mine => session.navigate(NavAction::OpenMyQuestions).map(drop),
        Input::Back => session.navigate(NavAction::Back).map(drop),
        Input::Home => session.navigate(NavAction::Home).map(drop),
        Input::Track(doc_id) => {
            let doc_id = doc_id.or_else(|| current_doc(session)).ok_or("usage: track <doc_id>")?;
            session.track(&doc_id).map(drop)
        }
        Input::Untrack(doc_id) => {
            let doc_id = doc_id.or_else(|| current_doc(session)).ok_or("usage: untrack <doc_id>")?;
            session.navigator.untrack(&doc_id);
            Ok(())
        }
        Input::Search(query) => {
            session.query = query;
            session.navigate(NavAction::Home).map(drop)
        }
        Input::Category(category) => {
            session.category = category;
            session.navigate(NavAction::Home).map(drop)
        }
        Input::Reload => return session.reload().map(drop).map_err(|e| e.to_string()),
        Input::Quit => Ok(()),
    };
    navigated.map_err(|e| e.to_string())
}

fn current_doc(session: &Session) -> Option<String> {
    match session.navigator.current() {
        Page::Detail { doc_id } => Some(doc_id.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::{session_for, SAMPLE};
    use serde_json::Value;

    fn browse(script: &str) -> Vec<Value> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kin.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let mut session = session_for(&path);

        let mut out = Vec::new();
        run_browse(&mut session, script.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse("open q1"), Ok(Input::Open("q1".into())));
        assert_eq!(parse("  track  "), Ok(Input::Track(None)));
        assert_eq!(parse("search 파이썬 에러"), Ok(Input::Search("파이썬 에러".into())));
        assert_eq!(parse("category"), Ok(Input::Category(None)));
        assert!(parse("open").is_err());
        assert!(parse("dance").is_err());
    }

    #[test]
    fn walks_pages() {
        let views = browse("open q1\ntrack\nmine\nback\nback\nquit\nopen q3\n");
        let pages: Vec<&str> = views.iter().map(|v| v["page"].as_str().unwrap()).collect();
        assert_eq!(pages, vec!["main", "detail", "detail", "my_questions", "detail", "main"]);
        assert_eq!(views[1]["tracked"], false);
        assert_eq!(views[2]["tracked"], true);
        assert_eq!(views[3]["questions"][0]["doc_id"], "q1");
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let views = browse("open q9\nback\nfly\nopen q2\n");
        assert_eq!(views.len(), 5);
        assert_eq!(views[1]["error"], "unknown question: q9");
        assert_eq!(views[2]["error"], "nothing to go back to");
        assert!(views[3]["error"].as_str().unwrap().starts_with("unknown command"));
        assert_eq!(views[4]["page"], "detail");
    }

    #[test]
    fn search_and_category_return_to_main() {
        let views = browse("open q1\nsearch 전세\ncategory 건강\ncategory\n");
        assert_eq!(views[2]["page"], "main");
        assert_eq!(views[2]["query"], "전세");
        assert_eq!(views[2]["answers"].as_array().unwrap().len(), 1);
        assert_eq!(views[3]["answers"].as_array().unwrap().len(), 0);
        assert_eq!(views[4]["category"], Value::Null);
        assert_eq!(views[4]["answers"][0]["doc_id"], "q3");
    }
}
