use alog::Level;
use std::error::Error;

#[test]
fn filtering_keeps_levels_at_or_above_minimal() {
    for (i, level) in Level::ALL.iter().enumerate() {
        for (j, minimal) in Level::ALL.iter().enumerate() {
            assert_eq!(level.passes(*minimal), i >= j, "{} vs {}", level, minimal);
        }
    }
}

#[test]
fn parse_levels() -> Result<(), Box<dyn Error>> {
    assert_eq!("warning".parse::<Level>()?, Level::Warning);
    assert_eq!("WARN".parse::<Level>()?, Level::Warning);
    assert_eq!(" Info ".parse::<Level>()?, Level::Info);
    assert_eq!("assert".parse::<Level>()?, Level::Wtf);
    assert_eq!("v".parse::<Level>()?, Level::Verbose);
    assert!("loud".parse::<Level>().is_err());
    Ok(())
}

#[test]
fn labels_and_letters() {
    let letters: String = Level::ALL.iter().map(|l| l.letter()).collect();
    assert_eq!(letters, "VDIWEA");
    assert_eq!(format!("{:<8}|", Level::Info), "INFO    |");
    assert_eq!(Level::Wtf.to_string(), "WTF");
}

#[test]
fn serde_uses_labels() -> Result<(), Box<dyn Error>> {
    assert_eq!(serde_json::to_string(&Level::Warning)?, "\"WARNING\"");
    let level: Level = serde_json::from_str("\"ERROR\"")?;
    assert_eq!(level, Level::Error);
    Ok(())
}
