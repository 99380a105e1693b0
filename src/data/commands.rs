//! Declarative command and environment tables
//!
//! Each entry maps a name to its argument spec: a string over `M`
//! (mandatory group), `T` (mandatory, text only), `O` (optional bracket
//! group) and `Q` (optional, text only). The parser configuration expands
//! every entry into a handler once.

use phf::phf_map;

/// Heading commands; all take one mandatory argument
pub static SECTIONING_COMMANDS: &[&str] = &[
    "chapter",
    "chapter*",
    "section",
    "section*",
    "subsection",
    "subsection*",
    "subsubsection",
    "subsubsection*",
    "paragraph",
];

/// Commands producing a plain command node
pub static PLAIN_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    "label" => "T",

    "localmoduletable" => "",
    "verbatiminput" => "T",
    "input" => "T",
    "caption" => "OM",
    "bibitem" => "OT",
    "fixme" => "M",
    "centerline" => "M",
    "centering" => "",
    "par" => "",
    "endhead" => "",
    "includegraphics" => "OM",
    "rowcolor" => "OT",
    "rowcolors" => "MMM",

    "versionadded" => "OT",
    "versionchanged" => "OT",
    "deprecated" => "TM",
    "XXX" => "M",

    // module-specific
    "declaremodule" => "QTT",
    "platform" => "T",
    "modulesynopsis" => "M",
    "moduleauthor" => "TT",
    "sectionauthor" => "TT",

    // reference lists
    "seelink" => "TMM",
    "seemodule" => "QTM",
    "seepep" => "TMM",
    "seerfc" => "TTM",
    "seetext" => "M",
    "seetitle" => "OMM",
    "seeurl" => "MM",
};

/// Additional signature lines inside description environments
pub static DESC_LINE_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    "funcline" => "TM",
    "funclineni" => "TM",
    "methodline" => "QTM",
    "methodlineni" => "QTM",
    "memberline" => "QT",
    "memberlineni" => "QT",
    "dataline" => "T",
    "datalineni" => "T",
    "cfuncline" => "MTM",
    "cmemberline" => "TTT",
    "csimplemacroline" => "T",
    "ctypeline" => "QT",
    "cvarline" => "TT",
};

/// Inline markup commands
pub static INLINE_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    "cite" => "M",
    "footnote" => "M",
    "frac" => "TT",
    "refmodule" => "QT",
    "citetitle" => "QT",
    "ulink" => "MT",
    "url" => "T",

    "textwidth" => "",
    "textheight" => "",

    // normal text
    "textrm" => "M",
    "b" => "M",
    "email" => "M",

    // strong
    "textbf" => "M",
    "strong" => "M",

    // emphasis
    "textit" => "M",
    "emph" => "M",

    // code
    "bfcode" => "M",
    "code" => "M",
    "samp" => "M",
    "character" => "M",
    "texttt" => "M",

    // default role
    "var" => "M",

    // [brackets]
    "optional" => "M",

    // roles
    "cdata" => "M",
    "cfunction" => "M",
    "class" => "M",
    "command" => "M",
    "constant" => "M",
    "csimplemacro" => "M",
    "ctype" => "M",
    "data" => "M",
    "dfn" => "M",
    "envvar" => "M",
    "exception" => "M",
    "file" => "M",
    "filenq" => "M",
    "filevar" => "M",
    "function" => "M",
    "grammartoken" => "M",
    "guilabel" => "M",
    "kbd" => "M",
    "keyword" => "M",
    "mailheader" => "M",
    "makevar" => "M",
    "manpage" => "MM",
    "member" => "M",
    "menuselection" => "M",
    "method" => "M",
    "mimetype" => "M",
    "module" => "M",
    "newsgroup" => "M",
    "option" => "M",
    "pep" => "M",
    "program" => "M",
    "programopt" => "M",
    "longprogramopt" => "M",
    "ref" => "T",
    "regexp" => "M",
    "rfc" => "M",
    "token" => "M",

    "NULL" => "",
    // substitutions
    "shortversion" => "",
    "version" => "",
    "today" => "",
};

/// Index-generating commands
pub static INDEX_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    "bifuncindex" => "T",
    "exindex" => "T",
    "kwindex" => "T",
    "obindex" => "T",
    "opindex" => "T",
    "refmodindex" => "T",
    "refexmodindex" => "T",
    "refbimodindex" => "T",
    "refstmodindex" => "T",
    "stindex" => "T",
    "index" => "M",
    "indexii" => "TT",
    "indexiii" => "TTT",
    "indexiv" => "TTTT",
    "ttindex" => "T",
    "withsubitem" => "TM",
};

/// Commands whose arguments are consumed and discarded
pub static IGNORED_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    "setindexsubitem" => "T",
    "tableofcontents" => "",
    "makeindex" => "",
    "makemodindex" => "",
    "maketitle" => "",
    "appendix" => "",
    "documentclass" => "OM",
    "usepackage" => "OM",
    "noindent" => "",
    "protect" => "",
    "ifhtml" => "",
    "fi" => "",
    "pagebreak" => "",
    "clearpage" => "",
    "footnotesize" => "",
    "normalsize" => "",
    "huge" => "",
    "hline" => "",
    "setlength" => "MM",
    "renewcommand" => "MM",
    "lstset" => "M",
    "locallinewidth" => "",
    "linewidth" => "",
    "indexname" => "",
};

/// Metadata commands and the key they store their argument under
pub static METADATA_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    "title" => "title",
    "author" => "author",
    "authoraddress" => "authoraddress",
    "date" => "date",
    "release" => "release",
    "setshortversion" => "shortversion",
    "setreleaseinfo" => "releaseinfo",
};

/// Environments producing a plain environment node
pub static PLAIN_ENVIRONMENTS: phf::Map<&'static str, &'static str> = phf_map! {
    "abstract" => "",
    "quote" => "",
    "quotation" => "",
    "center" => "",
    "em" => "",
    "thebibliography" => "T",

    "notice" => "Q",
    "seealso" => "",
    "seealso*" => "",
};

/// API description environments
pub static DESC_ENVIRONMENTS: phf::Map<&'static str, &'static str> = phf_map! {
    "datadesc" => "T",
    "datadescni" => "T",
    "excclassdesc" => "TM",
    "excdesc" => "T",
    "funcdesc" => "TM",
    "funcdescni" => "TM",
    "classdesc" => "TM",
    "classdesc*" => "T",
    "memberdesc" => "QT",
    "memberdescni" => "QT",
    "methoddesc" => "QMM",
    "methoddescni" => "QMM",
    "opcodedesc" => "TT",

    "cfuncdesc" => "MTM",
    "cmemberdesc" => "TTT",
    "csimplemacrodesc" => "T",
    "ctypedesc" => "QT",
    "cvardesc" => "TT",
};

/// Environments whose content is returned unwrapped
pub static TRANSPARENT_ENVIRONMENTS: &[&str] = &["document", "sloppypar", "flushleft", "sideways"];

/// Display math environments
pub static MATH_ENVIRONMENTS: &[&str] = &[
    "equation",
    "equation*",
    "eqnarray",
    "eqnarray*",
    "math",
    "displaymath",
];

/// Fixed-arity tables: suffix and column count (`tableii`, `longtableii`, ...)
pub static FIXED_TABLES: &[(&str, usize)] = &[("ii", 2), ("iii", 3), ("iv", 4), ("v", 5)];

/// Commands treated as fatal when encountered without a handler
pub static DEFAULT_KILLER_COMMANDS: &[&str] = &["em"];
