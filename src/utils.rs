/// Collapses every whitespace run to a single space and trims both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  The   Matrix \n"), "The Matrix");
        assert_eq!(normalize_whitespace("\t\n "), "");
    }
}
