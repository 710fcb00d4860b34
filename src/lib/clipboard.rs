/// A trait, necessary for every entity contact values can be copied into.
pub trait Clipboard {
    fn write_text(&mut self, text: &str);
}

/// Terminal "clipboard": the copied text goes to stdout.
#[derive(Debug, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Keeps only the last copied text.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) {
        self.contents = Some(text.to_owned());
    }
}
