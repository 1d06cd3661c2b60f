//! Line breaks kept outside the text widget.
//!
//! The toolkit editor stores bare lines and forgets which break separated
//! them. `LineMap` remembers the break after every line so a document reads
//! back exactly as it was loaded, including mixed `\n` / `\r\n` / `\r`
//! files and a final newline.
//!
//! ## Following edits
//!
//! After each edit the widget hands over its current lines and `sync`
//! lines them up against the previous ones: the unchanged lines at the
//! start and at the end keep their breaks, and only the breaks around the
//! edited span are reassigned. Breaks created by typing use the document's
//! most common ending.

/// Line ending style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnding {
    /// Unix-style: \n
    #[default]
    Lf,
    /// Windows-style: \r\n
    CrLf,
    /// Classic Mac: \r
    Cr,
}

impl LineEnding {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }

    /// Most frequent ending in `text`, `Lf` when there is none.
    ///
    /// Ties go to `Lf`, then `CrLf`.
    pub fn detect(text: &str) -> Self {
        let mut counts = [0usize; 3];
        for (_, ending) in split_lines(text) {
            match ending {
                Some(LineEnding::Lf) => counts[0] += 1,
                Some(LineEnding::CrLf) => counts[1] += 1,
                Some(LineEnding::Cr) => counts[2] += 1,
                None => {}
            }
        }
        let [lf, crlf, cr] = counts;
        if cr > lf && cr > crlf {
            LineEnding::Cr
        } else if crlf > lf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}

/// Splits `text` into lines and the break that ends each one.
///
/// The last piece has no break; it is empty when `text` ends with one.
/// `"\r\n"` is a single break.
pub fn split_lines(text: &str) -> Vec<(&str, Option<LineEnding>)> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push((&text[start..i], Some(LineEnding::Lf)));
                i += 1;
                start = i;
            }
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                lines.push((&text[start..i], Some(LineEnding::CrLf)));
                i += 2;
                start = i;
            }
            b'\r' => {
                lines.push((&text[start..i], Some(LineEnding::Cr)));
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    lines.push((&text[start..], None));
    lines
}

/// Rewrites every break in `text` as `\n`.
pub fn to_lf(text: &str) -> String {
    split_lines(text)
        .into_iter()
        .map(|(line, ending)| if ending.is_some() { format!("{line}\n") } else { line.to_string() })
        .collect()
}

/// Lines of a document together with the break after each one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMap {
    lines: Vec<String>,
    /// `breaks[i]` separates `lines[i]` and `lines[i + 1]`
    breaks: Vec<LineEnding>,
    /// Break after the last line that the widget does not show as a line
    trailing: Option<LineEnding>,
    /// Ending for breaks typed by the user
    fallback: LineEnding,
}

impl LineMap {
    /// Parses `text`, recording every break.
    pub fn parse(text: &str) -> Self {
        let pieces = split_lines(text);
        let breaks = pieces.iter().filter_map(|(_, ending)| *ending).collect();
        Self {
            lines: pieces.iter().map(|(line, _)| line.to_string()).collect(),
            breaks,
            trailing: None,
            fallback: LineEnding::detect(text),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Ending used for newly typed breaks.
    pub fn fallback(&self) -> LineEnding {
        self.fallback
    }

    /// The text with every break as `\n`, for handing to the widget.
    pub fn normalized(&self) -> String {
        self.lines.join("\n")
    }

    /// Reassembles the text with the recorded breaks.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            text.push_str(line);
            if let Some(ending) = self.breaks.get(i) {
                text.push_str(ending.as_str());
            }
        }
        if let Some(ending) = self.trailing {
            text.push_str(ending.as_str());
        }
        text
    }

    /// Number of lines, counting the empty line after a final break.
    pub fn line_count(&self) -> usize {
        self.lines.len() + usize::from(self.trailing.is_some())
    }

    /// Number of characters, counting each break as one.
    pub fn char_count(&self) -> usize {
        let text: usize = self.lines.iter().map(|line| line.chars().count()).sum();
        text + self.breaks.len() + usize::from(self.trailing.is_some())
    }

    /// Adopts the lines a widget shows right after loading `normalized()`.
    ///
    /// Some widgets do not show the empty line after a final break; that
    /// break is then kept as trailing instead of being lost.
    pub fn attach(&mut self, shown: Vec<String>) {
        let n = self.lines.len();
        if self.trailing.is_none()
            && n >= 2
            && shown.len() + 1 == n
            && self.lines[n - 1].is_empty()
            && shown[..] == self.lines[..n - 1]
        {
            self.lines.pop();
            self.trailing = self.breaks.pop();
            return;
        }
        self.sync(shown);
    }

    /// Follows an edit: `current` are the widget's lines after it.
    pub fn sync(&mut self, mut current: Vec<String>) {
        if current.is_empty() {
            current.push(String::new());
        }
        if current == self.lines {
            return;
        }

        let old_len = self.lines.len();
        let new_len = current.len();
        let prefix = self
            .lines
            .iter()
            .zip(&current)
            .take_while(|(a, b)| a == b)
            .count();
        let suffix = self.lines[prefix..]
            .iter()
            .rev()
            .zip(current[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        // Breaks with an unchanged line on both sides survive as they are.
        let head = prefix.saturating_sub(1);
        let tail = suffix.saturating_sub(1);
        let old_span = &self.breaks[head..old_len - 1 - tail];
        let new_span = new_len - 1 - head - tail;

        let mut breaks = Vec::with_capacity(new_len - 1);
        breaks.extend_from_slice(&self.breaks[..head]);
        for j in 0..new_span {
            let ending = if j + 1 == new_span {
                old_span.last().copied()
            } else if j + 1 < old_span.len() {
                Some(old_span[j])
            } else {
                None
            };
            breaks.push(ending.unwrap_or(self.fallback));
        }
        breaks.extend_from_slice(&self.breaks[old_len - 1 - tail..]);

        self.lines = current;
        self.breaks = breaks;
    }
}

impl Default for LineMap {
    fn default() -> Self {
        Self::parse("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_split_lines_keeps_each_break() {
        assert_eq!(
            split_lines("a\nb\r\nc\rd"),
            vec![
                ("a", Some(LineEnding::Lf)),
                ("b", Some(LineEnding::CrLf)),
                ("c", Some(LineEnding::Cr)),
                ("d", None),
            ]
        );
        assert_eq!(split_lines(""), vec![("", None)]);
        assert_eq!(split_lines("x\n"), vec![("x", Some(LineEnding::Lf)), ("", None)]);
    }

    #[test]
    fn test_detect_picks_most_common() {
        assert_eq!(LineEnding::detect("plain"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb\r\nc\n"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a\rb\rc\n"), LineEnding::Cr);
        assert_eq!(LineEnding::detect("a\nb\r\n"), LineEnding::Lf);
    }

    #[test]
    fn test_to_lf() {
        assert_eq!(to_lf("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_counts() {
        let map = LineMap::parse("ab\r\ncd\n");
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.char_count(), 6);
        assert_eq!(map.normalized(), "ab\ncd\n");
    }

    #[test]
    fn test_attach_keeps_hidden_final_break() {
        let text = "unix\nwindows\r\nunix again\n";
        let mut map = LineMap::parse(text);
        map.attach(vec!["unix".into(), "windows".into(), "unix again".into()]);
        assert_eq!(map.lines().len(), 3);
        assert_eq!(map.line_count(), 4);
        assert_eq!(map.text(), text);
    }

    #[test]
    fn test_attach_with_every_line_shown() {
        let text = "a\r\n";
        let mut map = LineMap::parse(text);
        map.attach(lines("a\n"));
        assert_eq!(map.text(), text);
    }

    #[test]
    fn test_typing_inside_a_line_keeps_all_breaks() {
        let mut map = LineMap::parse("one\r\ntwo\nthree\rfour");
        map.sync(lines("one\ntwo!\nthree\nfour"));
        assert_eq!(map.text(), "one\r\ntwo!\nthree\rfour");

        map.sync(lines("one?\ntwo!\nthree\nfour"));
        assert_eq!(map.text(), "one?\r\ntwo!\nthree\rfour");
    }

    #[test]
    fn test_new_break_uses_dominant_ending() {
        let mut map = LineMap::parse("a\r\nb\r\nc\n");
        assert_eq!(map.fallback(), LineEnding::CrLf);

        // Enter in the middle of "b"
        map.sync(lines("a\nb1\nb2\nc\n"));
        assert_eq!(map.text(), "a\r\nb1\r\nb2\r\nc\n");
    }

    #[test]
    fn test_split_keeps_break_of_split_line() {
        let mut map = LineMap::parse("x\ny\rz");
        map.sync(lines("x\ny1\ny2\nz"));
        assert_eq!(map.text(), "x\ny1\ny2\rz");
    }

    #[test]
    fn test_joining_lines_drops_the_joined_break() {
        let mut map = LineMap::parse("a\nb\r\nc\rd");
        // Backspace at the start of "c"
        map.sync(lines("a\nbc\nd"));
        assert_eq!(map.text(), "a\nbc\rd");

        // Backspace at the start of "bc"
        map.sync(lines("abc\nd"));
        assert_eq!(map.text(), "abc\rd");
    }

    #[test]
    fn test_enter_at_end_of_document() {
        let mut map = LineMap::parse("a\r\nb");
        map.sync(lines("a\nb\n"));
        assert_eq!(map.text(), "a\r\nb\r\n");
    }

    #[test]
    fn test_clearing_everything() {
        let mut map = LineMap::parse("a\nb\r\nc");
        map.sync(Vec::new());
        assert_eq!(map.text(), "");
        assert_eq!(map.line_count(), 1);
    }

    #[test]
    fn test_hidden_final_break_survives_edits() {
        let mut map = LineMap::parse("a\r\nb\r\n");
        map.attach(lines("a\nb"));
        map.sync(lines("a\nbb"));
        assert_eq!(map.text(), "a\r\nbb\r\n");
    }

    proptest! {
        #[test]
        fn prop_parse_reads_back_verbatim(text in "[ab\\r\\n]{0,40}") {
            let map = LineMap::parse(&text);
            prop_assert_eq!(map.text(), text);
        }

        #[test]
        fn prop_untouched_lines_keep_their_breaks(
            text in "[ab\\r\\n]{0,40}",
            index in 0usize..20,
        ) {
            let mut map = LineMap::parse(&text);
            let mut current = map.lines().to_vec();
            let index = index % current.len();
            current[index].push('z');
            map.sync(current);

            // Only the edited line changed, so every break is the same.
            let expected: String = split_lines(&text)
                .into_iter()
                .enumerate()
                .map(|(i, (line, ending))| {
                    let z = if i == index { "z" } else { "" };
                    format!("{line}{z}{}", ending.map_or("", |e| e.as_str()))
                })
                .collect();
            prop_assert_eq!(map.text(), expected);
        }
    }
}
