//! Text rendering for the console.

use std::fmt::Write;

use sleuth_core::models::{CandidateView, ListingEntry};

/// Multi-line person card.
pub fn person_card(candidate: &CandidateView) -> String {
    let mut out = String::new();
    let field = |value: &str| (if value.is_empty() { "unknown" } else { value }).to_string();

    let _ = writeln!(out, "  Name:        {}", candidate.name);
    let _ = writeln!(out, "  Gender:      {}", field(&candidate.gender));
    let _ = writeln!(out, "  Country:     {}", field(&candidate.country));
    let _ = writeln!(out, "  Occupation:  {}", field(&candidate.occupation));
    let _ = writeln!(out, "  Born:        {}", field(&candidate.birth_date));
    if candidate.alive {
        let _ = writeln!(out, "  Status:      Alive");
    } else {
        let _ = writeln!(out, "  Died:        {}", field(&candidate.death_date));
    }
    if !candidate.image_ref.is_empty() {
        let _ = writeln!(out, "  Image:       {}", candidate.image_ref);
    }
    let short = candidate.short_description();
    if !short.is_empty() {
        let ellipsis = if short.len() < candidate.description.len() { "..." } else { "" };
        let _ = writeln!(out, "  About:       {short}{ellipsis}");
    }
    out
}

/// Numbered listing of the remaining candidates.
pub fn listing(entries: &[ListingEntry]) -> String {
    if entries.is_empty() {
        return "  (no candidates left)\n".to_string();
    }
    let mut out = String::new();
    for (i, e) in entries.iter().enumerate() {
        let occupation = if e.occupation.is_empty() { "unknown" } else { e.occupation.as_str() };
        let _ = writeln!(out, "  {:>2}. {} ({}) - {}", i + 1, e.name, occupation, e.status());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_core::CandidateRecord;

    #[test]
    fn card_shows_death_or_alive() {
        let dead = CandidateRecord::new("Omar Sharif").with_death_date("2015-07-10");
        let card = person_card(&CandidateView::new(&dead, 1.0));
        assert!(card.contains("Died:        2015-07-10"));
        assert!(card.contains("Gender:      unknown"));

        let alive = CandidateRecord::new("Mohamed Salah");
        assert!(person_card(&CandidateView::new(&alive, 1.0)).contains("Status:      Alive"));
    }

    #[test]
    fn long_description_is_cut() {
        let r = CandidateRecord::new("x").with_description("a".repeat(400));
        let card = person_card(&CandidateView::new(&r, 1.0));
        assert!(card.contains(&format!("{}...", "a".repeat(300))));
    }

    #[test]
    fn listing_is_numbered() {
        let r = CandidateRecord::new("Faten Hamama")
            .with_occupation("actor")
            .with_death_date("2015-01-17");
        let text = listing(&[ListingEntry::new(&r, 1.0)]);
        assert_eq!(text, "   1. Faten Hamama (actor) - Deceased\n");
    }
}
