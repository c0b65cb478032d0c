//! C++ source emission for an encoded sample.
//!
//! The body file holds one `uint32_t` array; the declaration file holds the
//! matching `extern` and the sample's metadata constants.

use std::io::Write;

use wt_engine::{EncodedSample, StreamItem};
use wt_ir::SampleInfo;

pub const BODY_FILE_NAME: &str = "SF2_Decoded_Samples.cpp";
pub const DECL_FILE_NAME: &str = "SF2_Decoded_Samples.h";

/// Array identifier for a sample name: its first whitespace-delimited
/// token, restricted to C identifier characters.
pub fn array_identifier(name: &str) -> String {
    let token = name.split_whitespace().next().unwrap_or("");
    let mut ident: String = token
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() {
        ident.push_str("unnamed");
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Quote and escape a string as a C string literal.
pub fn c_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\{:03o}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn array_name(ident: &str) -> String {
    format!("{}_sample", ident)
}

pub fn write_body(
    w: &mut impl Write,
    ident: &str,
    encoded: &EncodedSample,
) -> std::io::Result<()> {
    writeln!(w, "#include \"{}\"", DECL_FILE_NAME)?;
    writeln!(w)?;
    writeln!(
        w,
        "const uint32_t {}[{}] = {{",
        array_name(ident),
        encoded.declared_len()
    )?;

    let mut at_line_start = true;
    for item in encoded.output.items() {
        match *item {
            StreamItem::Section(kind) => {
                // markers get their own line; the word count per line is unaffected
                if !at_line_start {
                    writeln!(w)?;
                }
                writeln!(w, "// {}", kind)?;
                at_line_start = true;
            }
            StreamItem::Header(word) | StreamItem::Word(word) => {
                write!(w, "0x{:08X},", word)?;
                at_line_start = false;
            }
            StreamItem::LineBreak => {
                writeln!(w)?;
                at_line_start = true;
            }
        }
    }
    if !at_line_start {
        writeln!(w)?;
    }
    writeln!(w, "}};")
}

pub fn write_declarations(
    w: &mut impl Write,
    ident: &str,
    sample: &SampleInfo,
    encoded: &EncodedSample,
) -> std::io::Result<()> {
    let [attack, sustain, decay] = encoded.word_counts();

    writeln!(w, "#pragma once")?;
    writeln!(w, "#include <stdint.h>")?;
    writeln!(w, "#include <string>")?;
    writeln!(w)?;
    writeln!(
        w,
        "extern const uint32_t {}[{}];",
        array_name(ident),
        encoded.declared_len()
    )?;
    writeln!(w)?;
    writeln!(
        w,
        "const std::string SAMPLE_INFO = {};",
        c_string_literal(&sample.to_string())
    )?;
    writeln!(
        w,
        "const std::string SAMPLE_NAME = {};",
        c_string_literal(&sample.name)
    )?;
    writeln!(w, "const int ORIGINAL_PITCH = {};", sample.original_pitch)?;
    writeln!(w, "const int SAMPLE_RATE = {};", sample.sample_rate)?;
    writeln!(w, "const int SAMPLE_TYPE = {};", sample.sample_type.raw())?;
    writeln!(w, "const bool IS_MONO = {};", sample.is_mono())?;
    writeln!(w, "const int ATTACK_LENGTH = {};", attack)?;
    writeln!(w, "const int LOOP_LENGTH = {};", sustain)?;
    writeln!(w, "const int DECAY_LENGTH = {};", decay)
}

pub fn body_to_bytes(ident: &str, encoded: &EncodedSample) -> Vec<u8> {
    let mut buf = Vec::new();
    write_body(&mut buf, ident, encoded).expect("Vec<u8> write cannot fail");
    buf
}

pub fn declarations_to_bytes(ident: &str, sample: &SampleInfo, encoded: &EncodedSample) -> Vec<u8> {
    let mut buf = Vec::new();
    write_declarations(&mut buf, ident, sample, encoded).expect("Vec<u8> write cannot fail");
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wt_engine::encode_sample;
    use wt_ir::Encoding;

    fn flute(start_loop: usize, end_loop: usize, end: usize) -> SampleInfo {
        let mut s = SampleInfo::new("Flute C4 soft");
        s.start_loop = start_loop;
        s.end_loop = end_loop;
        s.end = end;
        s.sample_rate = 44100;
        s.original_pitch = 72;
        s
    }

    #[test]
    fn identifier_is_first_token() {
        assert_eq!(array_identifier("Flute C4 soft"), "Flute");
        assert_eq!(array_identifier("  Oboe\tA3"), "Oboe");
    }

    #[test]
    fn identifier_replaces_non_identifier_chars() {
        assert_eq!(array_identifier("Str-Ens.2 x"), "Str_Ens_2");
        assert_eq!(array_identifier("808kick"), "_808kick");
    }

    #[test]
    fn blank_name_falls_back() {
        assert_eq!(array_identifier("   "), "unnamed");
        assert_eq!(array_identifier(""), "unnamed");
    }

    #[test]
    fn string_literals_are_escaped() {
        assert_eq!(c_string_literal(r#"a "b" \c"#), r#""a \"b\" \\c""#);
        assert_eq!(c_string_literal("x\u{1}a"), "\"x\\001a\"");
    }

    #[test]
    fn body_wraps_lines_and_marks_sections() {
        // one aligned block of ulaw samples per region
        let pcm = vec![0u8; 2 * 384];
        let sample = flute(256, 512, 768);
        let encoded = encode_sample(&sample, &pcm, Encoding::Ulaw).unwrap();
        let text = String::from_utf8(body_to_bytes("Flute", &encoded)).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("#include \"SF2_Decoded_Samples.h\""));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("const uint32_t Flute_sample[99] = {"));
        assert_eq!(lines.next(), Some("// attack"));
        // the header shares the first line with seven packed words
        let first = lines.next().unwrap();
        assert!(first.starts_with("0x01000080,0x00000000,"));
        assert_eq!(first.matches("0x").count(), 8);
        assert!(text.ends_with("};\n"));
        assert_eq!(text.matches("0x").count(), 99);
        assert_eq!(text.matches("// loop\n").count(), 1);
        assert_eq!(text.matches("// decay\n").count(), 1);
    }

    #[test]
    fn section_marker_breaks_a_partial_line() {
        // the attack region ends one word into a line
        let pcm = vec![0u8; 2 * 384];
        let sample = flute(256, 512, 768);
        let encoded = encode_sample(&sample, &pcm, Encoding::Ulaw).unwrap();
        let text = String::from_utf8(body_to_bytes("Flute", &encoded)).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        let at = lines.iter().position(|l| *l == "// loop").unwrap();
        // 1 header + 32 words: lines of 8, 8, 8, 8 and a lone word
        assert_eq!(lines[at - 1], "0x00000000,");
        assert!(lines[at + 1].starts_with("0x01000080,"));
        assert!(!text.contains(",// "));
    }

    #[test]
    fn declarations_list_metadata_and_lengths() {
        let pcm = vec![0u8; 768];
        let sample = flute(256, 512, 768);
        let encoded = encode_sample(&sample, &pcm, Encoding::Pcm).unwrap();
        let text = String::from_utf8(declarations_to_bytes("Flute", &sample, &encoded)).unwrap();

        let expected = "\
#pragma once
#include <stdint.h>
#include <string>

extern const uint32_t Flute_sample[195];

const std::string SAMPLE_INFO = \"Flute C4 soft: 384 frames @ 44100 Hz, key 72 (+0 cents), loop 128..256, mono\";
const std::string SAMPLE_NAME = \"Flute C4 soft\";
const int ORIGINAL_PITCH = 72;
const int SAMPLE_RATE = 44100;
const int SAMPLE_TYPE = 1;
const bool IS_MONO = true;
const int ATTACK_LENGTH = 65;
const int LOOP_LENGTH = 65;
const int DECAY_LENGTH = 65;
";
        assert_eq!(text, expected);
    }
}
