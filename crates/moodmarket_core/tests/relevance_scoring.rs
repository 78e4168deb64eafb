use moodmarket_core::{
    rank_matches, score_item, score_items, sort_by_score, Attribute, CatalogItem, CreatorProfile,
    MoodQuery, ScoredItem,
};

fn item_with_moods(title: &str, moods: &[&str]) -> CatalogItem {
    let mut item = CatalogItem::new(title);
    item.attributes = moods.iter().map(|mood| Attribute::mood(*mood)).collect();
    item
}

#[test]
fn empty_query_scores_zero_for_every_item() {
    let query = MoodQuery::parse("");
    let items = vec![
        item_with_moods("Serene Lake", &["serene"]),
        item_with_moods("", &[]),
    ];

    for scored in score_items(&query, items) {
        assert_eq!(scored.score, 0);
    }
}

#[test]
fn declared_mood_tag_matches_case_insensitively() {
    let mut item = CatalogItem::new("Untitled");
    item.attributes = vec![Attribute::new("mood", "Serene")];

    assert_eq!(score_item(&MoodQuery::parse("serene"), &item), 100);
}

#[test]
fn half_of_tokens_matching_scores_fifty() {
    let item = item_with_moods("Untitled", &["serene"]);
    assert_eq!(score_item(&MoodQuery::parse("serene,hopeful"), &item), 50);
}

#[test]
fn title_substring_counts_as_match() {
    let item = CatalogItem::new("Neon Glow #3");
    assert_eq!(score_item(&MoodQuery::parse("glow"), &item), 100);
}

#[test]
fn description_and_creator_count_as_matches() {
    let mut item = CatalogItem::new("Untitled");
    item.description = Some("A MELANCHOLY harbor at dawn".to_string());
    item.creator = Some(CreatorProfile {
        display_name: Some("Luna Park".to_string()),
        username: Some("lunapark".to_string()),
    });

    assert_eq!(score_item(&MoodQuery::parse("melancholy"), &item), 100);
    assert_eq!(score_item(&MoodQuery::parse("luna"), &item), 100);
    assert_eq!(score_item(&MoodQuery::parse("melancholy,luna,storm"), &item), 67);
}

#[test]
fn mood_tags_require_exact_token_while_text_allows_substrings() {
    let item = item_with_moods("Untitled", &["serenity"]);
    assert_eq!(score_item(&MoodQuery::parse("serene"), &item), 0);

    let titled = CatalogItem::new("Serenity Now");
    assert_eq!(score_item(&MoodQuery::parse("serene"), &titled), 0);
    assert_eq!(score_item(&MoodQuery::parse("seren"), &titled), 100);
}

#[test]
fn multi_word_tokens_match_text_with_irregular_spacing() {
    let mut item = item_with_moods("Deep  Blue", &[]);
    item.description = Some("a\tquiet   harbor".to_string());

    assert_eq!(score_item(&MoodQuery::parse("deep blue"), &item), 100);
    assert_eq!(score_item(&MoodQuery::parse("Quiet Harbor"), &item), 100);
}

#[test]
fn duplicate_tokens_count_individually() {
    let item = item_with_moods("Untitled", &["calm"]);
    assert_eq!(score_item(&MoodQuery::parse("calm,calm,wild"), &item), 67);
}

#[test]
fn scores_stay_within_bounds_and_are_idempotent() {
    let queries = ["a", "serene,x,y", "neon,glow,#3,dark,wild", "zzz"];
    let mut item = item_with_moods("Neon Glow #3", &["dark"]);
    item.description = Some("wild lights".to_string());

    for raw in queries {
        let query = MoodQuery::parse(raw);
        let first = score_item(&query, &item);
        let second = score_item(&query, &item);
        assert!(first <= 100);
        assert_eq!(first, second);
    }
}

#[test]
fn adding_a_matching_token_never_lowers_score() {
    let item = item_with_moods("Neon Glow", &["electric"]);
    let base = MoodQuery::parse("glow,rain");
    let extended = MoodQuery::parse("glow,rain,electric");

    assert!(score_item(&extended, &item) >= score_item(&base, &item));
}

#[test]
fn missing_attributes_and_creator_do_not_fail() {
    let payload = r#"{
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Quiet Harbor",
        "attributes": [{"trait_type": 7}, null, {"value": "serene"}]
    }"#;
    let item: CatalogItem = serde_json::from_str(payload).unwrap();

    assert!(item.mood_tags().is_empty());
    assert_eq!(score_item(&MoodQuery::parse("quiet,serene"), &item), 50);
}

#[test]
fn descending_sort_keeps_input_order_for_ties() {
    let query = MoodQuery::parse("calm,wild");
    let items = vec![
        item_with_moods("first-half", &["calm"]),
        item_with_moods("full", &["calm", "wild"]),
        item_with_moods("second-half", &["wild"]),
        item_with_moods("none", &[]),
        item_with_moods("third-half", &["calm"]),
    ];

    let mut scored = score_items(&query, items);
    sort_by_score(&mut scored);
    let titles: Vec<_> = scored.iter().map(|s| s.item.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["full", "first-half", "second-half", "third-half", "none"]
    );
}

#[test]
fn rank_matches_filters_non_matches_and_caps() {
    let query = MoodQuery::parse("calm");
    let items = (0..12)
        .map(|n| {
            if n % 3 == 0 {
                item_with_moods(&format!("loud {n}"), &["chaotic"])
            } else {
                item_with_moods(&format!("still {n}"), &["calm"])
            }
        })
        .collect::<Vec<_>>();

    let ranked: Vec<ScoredItem> = rank_matches(&query, items.clone(), Some(5));
    assert_eq!(ranked.len(), 5);
    assert!(ranked.iter().all(|scored| scored.score == 100));
    assert_eq!(ranked[0].item.title, "still 1");
    assert_eq!(ranked[0].primary_mood, "calm");

    let uncapped = rank_matches(&query, items.clone(), None);
    assert_eq!(uncapped.len(), 8);

    assert!(rank_matches(&MoodQuery::default(), items, None).is_empty());
}
