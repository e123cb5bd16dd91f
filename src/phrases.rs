use std::fs;
use std::io;
use std::path::Path;

/// Built-in phrase sequence used when no phrase file is configured.
const DEFAULT_PHRASES: &[&str] = &[
    "The quick brown fox jumps over the lazy dog",
    "Pack my box with five dozen liquor jugs",
    "How vexingly quick daft zebras jump",
    "Sphinx of black quartz judge my vow",
    "The five boxing wizards jump quickly",
    "Bright vixens jump while dozy fowl quack",
    "Jackdaws love my big sphinx of quartz",
    "We promptly judged antique ivory buckles for the next prize",
    "Crazy Fredrick bought many very exquisite opal jewels",
    "Grumpy wizards make toxic brew for the evil queen and jack",
];

/// The built-in ordered phrase sequence.
pub fn default_phrases() -> Vec<String> {
    DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect()
}

/// Load a phrase sequence from a file, one phrase per line.
/// Blank lines are skipped; order is preserved.
pub fn load_phrases<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}
