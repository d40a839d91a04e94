use std::fmt;

use super::destination::Destination;

/// What kind of advice to generate for a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceIntent {
    /// Day-by-day travel plan.
    Itinerary,
    /// Money-saving tips.
    BudgetTips,
}

impl fmt::Display for AdviceIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdviceIntent::Itinerary => write!(f, "itinerary"),
            AdviceIntent::BudgetTips => write!(f, "budget_tips"),
        }
    }
}

/// Render the offline template for the given intent.
pub fn fallback_advice(destination: &Destination, intent: AdviceIntent) -> String {
    match intent {
        AdviceIntent::Itinerary => fallback_itinerary(destination),
        AdviceIntent::BudgetTips => fallback_budget_tips(destination),
    }
}

/// Basic day skeleton used when the AI service is not configured.
pub fn fallback_itinerary(destination: &Destination) -> String {
    // Records loaded from older files may end before they start.
    let inverted = destination.day_count() < 1;
    let days = destination.day_count().max(1);
    let activities = destination.activities();
    let morning = activities.first().map(String::as_str).unwrap_or("Sightseeing");
    let afternoon = activities.get(1).map(String::as_str).unwrap_or("Local exploration");

    let mut out = String::new();
    out.push_str("🚫 AI Features Unavailable - Basic Itinerary Template\n\n");
    out.push_str(&format!("📍 {}, {}\n", destination.city(), destination.country()));
    out.push_str(&format!(
        "📅 {} to {} ({} days)\n",
        destination.start_date(),
        destination.end_date(),
        days
    ));
    if inverted {
        out.push_str("⚠️  End date is before start date; showing a one-day outline.\n");
    }
    out.push_str(&format!("💰 Budget: ${:.2}\n", destination.budget()));
    out.push_str(&format!("🎯 Activities: {}\n\n", activities.join(", ")));
    out.push_str("📋 SUGGESTED DAILY STRUCTURE:\n");
    out.push_str(&"=".repeat(40));
    out.push_str("\n\n");

    out.push_str("Day 1: Arrival & City Orientation\n");
    out.push_str("- Check into accommodation\n");
    out.push_str("- Explore nearby area\n");
    out.push_str("- Local restaurant for dinner\n\n");

    // Middle days only exist for trips of three days or more.
    if days >= 3 {
        let span = if days == 3 {
            "Day 2".to_string()
        } else {
            format!("Day 2-{}", days - 1)
        };
        out.push_str(&format!("{}: Main Activities\n", span));
        out.push_str(&format!("- Morning: {}\n", morning));
        out.push_str(&format!("- Afternoon: {}\n", afternoon));
        out.push_str("- Evening: Local cuisine and culture\n\n");
    }

    if days >= 2 {
        out.push_str(&format!("Day {}: Departure\n", days));
        out.push_str("- Last-minute shopping/activities\n");
        out.push_str("- Check out and travel home\n\n");
    }

    out.push_str("💡 GENERAL TIPS:\n");
    out.push_str("- Research local transportation options\n");
    out.push_str("- Book accommodations in advance\n");
    out.push_str("- Try local street food\n");
    out.push_str("- Visit tourist information centers\n");
    out.push_str("- Keep emergency contacts handy\n\n");
    out.push_str("⚠️  For detailed, personalized itineraries, please set up your OpenAI API key.\n");
    out
}

/// Categorized budget tips used when the AI service is not configured.
pub fn fallback_budget_tips(destination: &Destination) -> String {
    const SECTIONS: &[(&str, &[&str])] = &[
        (
            "🏠 ACCOMMODATION:",
            &[
                "Consider hostels or budget hotels",
                "Look for accommodations outside city center",
                "Book in advance for better rates",
                "Check for group discounts",
            ],
        ),
        (
            "🍽️ FOOD & DINING:",
            &[
                "Eat at local markets and street food stalls",
                "Cook meals if accommodation has kitchen",
                "Look for lunch specials and happy hours",
                "Avoid touristy restaurant areas",
            ],
        ),
        (
            "🚌 TRANSPORTATION:",
            &[
                "Use public transport instead of taxis",
                "Walk or rent bicycles when possible",
                "Look for day passes or tourist cards",
                "Book flights/trains in advance",
            ],
        ),
        (
            "🎯 ACTIVITIES:",
            &[
                "Look for free walking tours",
                "Visit free museums on designated days",
                "Enjoy parks and natural attractions",
                "Check for student/senior discounts",
            ],
        ),
        (
            "💡 GENERAL MONEY-SAVING TIPS:",
            &[
                "Set a daily spending limit",
                "Use budget tracking apps",
                "Avoid currency exchange at airports",
                "Negotiate prices at local markets",
                "Travel during off-peak seasons",
            ],
        ),
    ];

    let mut out = String::new();
    out.push_str("🚫 AI Features Unavailable - General Budget Tips\n\n");
    out.push_str(&format!("💰 BUDGET TIPS FOR {}\n", destination.city().to_uppercase()));
    out.push_str(&"=".repeat(40));
    out.push('\n');

    for (heading, tips) in SECTIONS {
        out.push('\n');
        out.push_str(heading);
        out.push('\n');
        for tip in *tips {
            out.push_str(&format!("- {}\n", tip));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(start: &str, end: &str, activities: &[&str]) -> Destination {
        Destination::new(
            "Kyoto",
            "Japan",
            start,
            end,
            2500.0,
            activities.iter().map(|a| a.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_itinerary_template_structure() {
        let text = fallback_itinerary(&trip("2024-04-01", "2024-04-05", &["Temples", "Tea"]));
        assert!(text.starts_with("🚫 AI Features Unavailable"));
        assert!(text.contains("📍 Kyoto, Japan"));
        assert!(text.contains("(5 days)"));
        assert!(text.contains("Day 1: Arrival"));
        assert!(text.contains("Day 2-4: Main Activities"));
        assert!(text.contains("- Morning: Temples"));
        assert!(text.contains("- Afternoon: Tea"));
        assert!(text.contains("Day 5: Departure"));
    }

    #[test]
    fn test_itinerary_template_defaults_second_activity() {
        let text = fallback_itinerary(&trip("2024-04-01", "2024-04-03", &["Temples"]));
        assert!(text.contains("Day 2: Main Activities"));
        assert!(text.contains("- Afternoon: Local exploration"));
    }

    #[test]
    fn test_short_trips_skip_missing_days() {
        let one_day = fallback_itinerary(&trip("2024-04-01", "2024-04-01", &["Temples"]));
        assert!(one_day.contains("(1 days)"));
        assert!(!one_day.contains("Main Activities"));
        assert!(!one_day.contains("Departure"));

        let two_days = fallback_itinerary(&trip("2024-04-01", "2024-04-02", &["Temples"]));
        assert!(!two_days.contains("Main Activities"));
        assert!(two_days.contains("Day 2: Departure"));
    }

    #[test]
    fn test_inverted_dates_render_one_day_outline() {
        let json = r#"{"city": "Kyoto", "country": "Japan", "start_date": "2024-04-05",
            "end_date": "2024-04-01", "budget": 900.0, "activities": ["Temples"]}"#;
        let legacy: Destination = serde_json::from_str(json).unwrap();
        assert!(legacy.day_count() < 1);

        let text = fallback_itinerary(&legacy);
        assert!(text.contains("(1 days)"));
        assert!(!text.contains("-3 days"));
        assert!(text.contains("End date is before start date"));
        assert!(!text.contains("Departure"));

        let normal = fallback_itinerary(&trip("2024-04-01", "2024-04-02", &["Temples"]));
        assert!(!normal.contains("End date is before start date"));
    }

    #[test]
    fn test_budget_tips_template() {
        let d = trip("2024-04-01", "2024-04-05", &["Temples"]);
        let text = fallback_advice(&d, AdviceIntent::BudgetTips);
        assert!(text.contains("BUDGET TIPS FOR KYOTO"));
        for heading in ["ACCOMMODATION", "FOOD & DINING", "TRANSPORTATION", "ACTIVITIES", "GENERAL MONEY-SAVING TIPS"] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert_eq!(text, fallback_budget_tips(&d));
    }
}
