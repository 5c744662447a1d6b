pub fn render() -> String {
    "Home\n".to_string()
}
