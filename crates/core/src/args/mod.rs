/// Field marker tags such as `n/`.
pub mod prefix;
/// The edit command's prefix constants.
pub mod syntax;
/// Multi-valued lookup table produced by the tokenizer.
pub mod table;
/// Splits an argument string into a preamble and prefixed values.
pub mod tokenizer;
