/// Version assigned to identifiers written without one (`"A"` means `"A@1.0"`)
pub const DEFAULT_VERSION: &str = "1.0";
/// Separates name and version in the textual identifier form
pub const IDENTIFIER_SEPARATOR: char = '@';
/// Separates identifier and value in command-line inputs (`A@1.0=2`)
pub const INPUT_ASSIGNMENT: char = '=';
