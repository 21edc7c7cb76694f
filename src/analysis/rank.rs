const MEDALS: [&str; 8] = [
    "Herald", "Guardian", "Crusader", "Archon", "Legend", "Ancient", "Divine", "Immortal",
];

/// Turns an upstream `rank_tier` (tens digit = medal, ones digit = stars)
/// into a readable rank such as `Legend 3`. Immortal carries no stars.
pub fn rank_tier_name(rank_tier: Option<u32>) -> String {
    let Some(tier) = rank_tier else {
        return "Unknown".to_string();
    };

    let medal = tier / 10;
    let stars = tier % 10;

    match medal {
        8 => "Immortal".to_string(),
        1..=7 if (1..=5).contains(&stars) => format!("{} {}", MEDALS[medal as usize - 1], stars),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(11), "Herald 1")]
    #[case(Some(25), "Guardian 5")]
    #[case(Some(43), "Archon 3")]
    #[case(Some(75), "Divine 5")]
    #[case(Some(80), "Immortal")]
    #[case(Some(84), "Immortal")]
    #[case(None, "Unknown")]
    #[case(Some(0), "Unknown")]
    #[case(Some(90), "Unknown")]
    #[case(Some(37), "Unknown")]
    fn names_rank_tiers(#[case] tier: Option<u32>, #[case] expected: &str) {
        assert_eq!(rank_tier_name(tier), expected);
    }
}
