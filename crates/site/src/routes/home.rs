//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::models::Product;
use crate::services::CatalogStats;
use crate::state::AppState;

// =============================================================================
// FAQ (static content)
// =============================================================================

/// A question/answer pair for the FAQ accordion.
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Static FAQ entries, also emitted as `FAQPage` structured data.
const FAQS: &[FaqEntry] = &[
    FaqEntry {
        question: "Which Pokémon are in the first LEGO wave?",
        answer: "The launch lineup includes Pikachu, Eevee, the Kanto Starters (Charizard, \
                 Blastoise, Venusaur), and an interactive Poké Ball.",
    },
    FaqEntry {
        question: "What is the Lego Pokémon Treasure Hunt?",
        answer: "It is a contest where fans can win exclusive sets by finding hidden golden \
                 bricks in sets. Stay tuned to BrickMon for clues.",
    },
    FaqEntry {
        question: "When does the Lego Pokémon Kanto set release?",
        answer: "The release date is rumored for mid-2026, though official confirmation from \
                 Lego and The Pokémon Company is still pending. We'll update this tracker as \
                 soon as official dates are announced.",
    },
    FaqEntry {
        question: "How much will the Lego Pikachu cost?",
        answer: "Retail price is expected to be $99.99 for the life-size Pikachu set, based on \
                 similar Lego buildable figure releases. Prices may vary by retailer and region.",
    },
    FaqEntry {
        question: "Is BrickMon affiliated with Lego?",
        answer: "No, we are a free community tracker and are not affiliated with Lego, The \
                 Pokémon Company, or any retailers. BrickMon is an independent service helping \
                 fans track stock and avoid scalper prices.",
    },
];

/// `FAQPage` JSON-LD for the static FAQ entries.
fn faq_json_ld() -> String {
    let main_entity: Vec<serde_json::Value> = FAQS
        .iter()
        .map(|faq| {
            serde_json::json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();

    serde_json::json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": main_entity,
    })
    .to_string()
}

// =============================================================================
// Product Views
// =============================================================================

/// Product display data for the catalog grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub name: String,
    pub slug: String,
    pub price_label: String,
    pub status: String,
    pub badge_class: &'static str,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            slug: product.slug.as_str().to_owned(),
            price_label: product.price_label().to_owned(),
            status: product.status.clone(),
            badge_class: product.status_tone().css_class(),
            image_url: product.image_url.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Catalog grid cards.
    pub products: Vec<ProductCardView>,
    /// Figures for the live stats bar.
    pub stats: CatalogStats,
    /// FAQ accordion entries.
    pub faqs: &'static [FaqEntry],
    /// Serialized `FAQPage` structured data.
    pub faq_json_ld: String,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let snapshot = state.catalog().snapshot().await?;

    let products = snapshot
        .products()
        .iter()
        .map(ProductCardView::from)
        .collect();

    Ok(HomeTemplate {
        products,
        stats: snapshot.stats(),
        faqs: FAQS,
        faq_json_ld: faq_json_ld(),
    })
}
