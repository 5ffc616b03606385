// src/offers/accommodation.rs
//! Keeps the offers that mention employer-provided lodging and reshapes them
//! into the public response format.

use super::types::{FormattedOffer, JobsPayload, JobsStats, QueryEcho, RawOffer};
use super::SearchQuery;
use crate::utils::{iso_timestamp, truncate_with_ellipsis};

/// Lowercase substrings that mark an offer as "logé".
pub const ACCOMMODATION_KEYWORDS: [&str; 10] = [
    "logé",
    "logée",
    "logés",
    "logées",
    "logement",
    "hébergement",
    "nourri logé",
    "logement fourni",
    "hébergement inclus",
    "logement inclus",
];

pub const DESCRIPTION_MAX_CHARS: usize = 250;

const TITLE_FALLBACK: &str = "Titre non disponible";
const COMPANY_FALLBACK: &str = "Entreprise non spécifiée";
const LOCATION_FALLBACK: &str = "Lieu non spécifié";
const CONTRACT_FALLBACK: &str = "CDD";
const WORK_TIME_FALLBACK: &str = "Temps plein";
const DESCRIPTION_FALLBACK: &str = "Description non disponible";
const URL_FALLBACK: &str = "#";

/// Plain substring match on lowercased "title description", no word boundaries.
pub fn mentions_accommodation(offer: &RawOffer) -> bool {
    let text = format!(
        "{} {}",
        offer.intitule.as_deref().unwrap_or_default(),
        offer.description.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    ACCOMMODATION_KEYWORDS
        .iter()
        .any(|keyword| text.contains(keyword))
}

/// Empty strings upstream are treated like missing values.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn format_offer(offer: RawOffer) -> FormattedOffer {
    FormattedOffer {
        id: offer.id,
        title: non_empty(offer.intitule).unwrap_or_else(|| TITLE_FALLBACK.to_string()),
        company: non_empty(offer.entreprise.and_then(|e| e.nom))
            .unwrap_or_else(|| COMPANY_FALLBACK.to_string()),
        location: non_empty(offer.lieu_travail.and_then(|l| l.libelle))
            .unwrap_or_else(|| LOCATION_FALLBACK.to_string()),
        contract: non_empty(offer.type_contrat).unwrap_or_else(|| CONTRACT_FALLBACK.to_string()),
        work_time: non_empty(offer.duree_travail_libelle)
            .unwrap_or_else(|| WORK_TIME_FALLBACK.to_string()),
        salary: non_empty(offer.salaire.and_then(|s| s.libelle)),
        description: non_empty(offer.description)
            .map(|d| truncate_with_ellipsis(&d, DESCRIPTION_MAX_CHARS))
            .unwrap_or_else(|| DESCRIPTION_FALLBACK.to_string()),
        url: non_empty(offer.origine_offre.and_then(|o| o.url_origine))
            .unwrap_or_else(|| URL_FALLBACK.to_string()),
        created_date: offer.date_creation,
        has_accommodation: true,
    }
}

/// Build the success payload from the raw search results.
pub fn filter_and_format(offers: Vec<RawOffer>, query: &SearchQuery) -> JobsPayload {
    let total_found = offers.len();

    let jobs: Vec<FormattedOffer> = offers
        .into_iter()
        .filter(mentions_accommodation)
        .map(format_offer)
        .collect();

    JobsPayload {
        success: true,
        timestamp: iso_timestamp(),
        query: QueryEcho {
            location: query.display_location().to_string(),
            keywords: query.keywords.clone(),
        },
        stats: JobsStats {
            total_found,
            with_accommodation: jobs.len(),
        },
        jobs,
    }
}
