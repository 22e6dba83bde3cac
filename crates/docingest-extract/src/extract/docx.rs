use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::failure::Failure;

const DOCUMENT_PART: &str = "word/document.xml";

pub(super) fn extract(path: &Path) -> Result<String, Failure> {
    let file = File::open(path).map_err(|e| Failure::extraction(path, e))?;
    let mut package = zip::ZipArchive::new(file).map_err(|e| Failure::extraction(path, e))?;
    let mut part = package
        .by_name(DOCUMENT_PART)
        .map_err(|e| Failure::extraction(path, format!("{DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| Failure::extraction(path, e))?;

    paragraphs(&xml)
        .map(|paragraphs| paragraphs.join("\n"))
        .map_err(|e| Failure::extraction(path, e))
}

/// Texts of the body-level paragraphs of a WordprocessingML document, in
/// document order.
///
/// Paragraphs inside tables and text boxes are not part of the body flow and
/// are left out. Within a run, `w:tab` becomes `\t` and `w:br`/`w:cr` become
/// `\n`.
pub fn paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    // Stack depth at which a text box opened.
    let mut text_box: Option<usize> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let local = e.local_name().as_ref().to_vec();
                if text_box.is_none() {
                    match local.as_slice() {
                        b"p" if parent_is(&stack, b"body") => current = Some(String::new()),
                        b"txbxContent" => text_box = Some(stack.len()),
                        _ => {}
                    }
                }
                stack.push(local);
            }
            Event::Empty(e) => {
                if text_box.is_some() {
                    continue;
                }
                let local = e.local_name();
                match local.as_ref() {
                    b"p" if parent_is(&stack, b"body") => paragraphs.push(String::new()),
                    b"tab" if parent_is(&stack, b"r") => push_to(&mut current, "\t"),
                    b"br" | b"cr" if parent_is(&stack, b"r") => push_to(&mut current, "\n"),
                    _ => {}
                }
            }
            Event::Text(t) => {
                if text_box.is_none() && parent_is(&stack, b"t") {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::End(_) => {
                let local = stack.pop();
                if text_box == Some(stack.len()) {
                    text_box = None;
                }
                if local.as_deref() == Some(b"p".as_slice()) && parent_is(&stack, b"body") {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().is_some_and(|last| last.as_slice() == name)
}

fn push_to(current: &mut Option<String>, s: &str) {
    if let Some(text) = current.as_mut() {
        text.push_str(s);
    }
}
