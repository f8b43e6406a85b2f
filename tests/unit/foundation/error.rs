use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HabitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(HabitError::render("x").to_string().contains("render error:"));
    assert!(HabitError::output("x").to_string().contains("output error:"));
    assert!(
        HabitError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HabitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
