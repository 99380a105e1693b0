//! Fixed text mappings
//!
//! Commands that stand for a fixed piece of text, and the accent table used
//! by `\"o`-style accent commands.

use phf::phf_map;

/// Commands directly mapped to text
pub static SIMPLE_TEXT: phf::Map<&'static str, &'static str> = phf_map! {
    "AA" => "\u{00C5}", // A as in Angstrom
    "ASCII" => "ASCII",
    "C" => "C",
    "Cpp" => "C++",
    "EOF" => "EOF",
    "LaTeX" => "LaTeX",
    "POSIX" => "POSIX",
    "UNIX" => "Unix",
    "Unix" => "Unix",
    "backslash" => "\\\\",
    "copyright" => "\u{00A9}",
    // mostly used inside \code, so not escaped
    "e" => "\\",
    "geq" => "\u{2265}",
    "infinity" => "\u{221E}",
    "ldots" => "...",
    "leq" => "\u{2264}",
    "moreargs" => "...",
    "pi" => "\u{03C0}",
    "plusminus" => "\u{00B1}",
    "sub" => "--> ", // menu separator
    "textasciicircum" => "^",
    "textasciitilde" => "~",
    "textbackslash" => "\\\\",
    "textbar" => "|",
    "texteuro" => "\u{20AC}",
    "textgreater" => ">",
    "textless" => "<",
    "textunderscore" => "_",
    "tilde" => "~",
    "unspecified" => "...",
};

/// Precomposed accented characters, keyed by accent command and letter
pub static ACCENTED: phf::Map<&'static str, &'static str> = phf_map! {
    // umlaut
    "\"a" => "ä", "\"e" => "ë", "\"i" => "ï", "\"o" => "ö", "\"u" => "ü", "\"y" => "ÿ",
    "\"A" => "Ä", "\"E" => "Ë", "\"I" => "Ï", "\"O" => "Ö", "\"U" => "Ü",
    // acute
    "'a" => "á", "'e" => "é", "'i" => "í", "'o" => "ó", "'u" => "ú", "'y" => "ý",
    "'A" => "Á", "'E" => "É", "'I" => "Í", "'O" => "Ó", "'U" => "Ú", "'Y" => "Ý",
    // grave
    "`a" => "à", "`e" => "è", "`i" => "ì", "`o" => "ò", "`u" => "ù",
    "`A" => "À", "`E" => "È", "`I" => "Ì", "`O" => "Ò", "`U" => "Ù",
    // tilde
    "~a" => "ã", "~n" => "ñ", "~o" => "õ",
    "~A" => "Ã", "~N" => "Ñ", "~O" => "Õ",
    // cedilla
    "cc" => "ç", "cC" => "Ç",
};

/// Combining mark for an accent command, used when no precomposed form exists
pub fn combining_mark(accent: char) -> Option<char> {
    match accent {
        '"' => Some('\u{0308}'),
        '\'' => Some('\u{0301}'),
        '`' => Some('\u{0300}'),
        '~' => Some('\u{0303}'),
        'c' => Some('\u{0327}'),
        _ => None,
    }
}

/// Compose `letter` with the accent command `accent`
pub fn compose_accent(accent: char, letter: char) -> Option<String> {
    let key = format!("{}{}", accent, letter);
    if let Some(composed) = ACCENTED.get(key.as_str()) {
        return Some((*composed).to_string());
    }
    combining_mark(accent).map(|mark| format!("{}{}", letter, mark))
}
