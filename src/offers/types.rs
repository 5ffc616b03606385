// src/offers/types.rs
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Decode a field, treating a value of the wrong JSON type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Offer identifiers are strings upstream, but tolerate numbers.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Some(id),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

// Upstream (France Travail "offres d'emploi v2") payloads

#[derive(Debug, Default, Deserialize)]
pub struct SearchResults {
    /// Kept undecoded so one malformed entry cannot discard the others.
    #[serde(default, deserialize_with = "lenient")]
    pub resultats: Option<Vec<serde_json::Value>>,
}

impl SearchResults {
    /// Decode each listed offer. Entries that are not objects are skipped.
    pub fn into_offers(self) -> Vec<RawOffer> {
        self.resultats
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<RawOffer>(entry) {
                Ok(offer) => Some(offer),
                Err(e) => {
                    warn!("Skipping malformed offer at index {}: {}", index, e);
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub intitule: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub entreprise: Option<Entreprise>,
    #[serde(default, deserialize_with = "lenient")]
    pub lieu_travail: Option<LieuTravail>,
    #[serde(default, deserialize_with = "lenient")]
    pub type_contrat: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub duree_travail_libelle: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub salaire: Option<Salaire>,
    #[serde(default, deserialize_with = "lenient")]
    pub origine_offre: Option<OrigineOffre>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_creation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entreprise {
    #[serde(default, deserialize_with = "lenient")]
    pub nom: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LieuTravail {
    #[serde(default, deserialize_with = "lenient")]
    pub libelle: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Salaire {
    #[serde(default, deserialize_with = "lenient")]
    pub libelle: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrigineOffre {
    #[serde(default, deserialize_with = "lenient")]
    pub url_origine: Option<String>,
}

// Normalized output

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattedOffer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub contract: String,
    pub work_time: String,
    pub salary: Option<String>,
    pub description: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    pub has_accommodation: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryEcho {
    pub location: String,
    pub keywords: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobsStats {
    pub total_found: usize,
    pub with_accommodation: usize,
}

/// Body of a successful `GET /api/jobs`.
#[derive(Debug, Clone, Serialize)]
pub struct JobsPayload {
    pub success: bool,
    pub timestamp: String,
    pub query: QueryEcho,
    pub stats: JobsStats,
    pub jobs: Vec<FormattedOffer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_nested_fields() {
        let offer: RawOffer = serde_json::from_value(json!({
            "id": "180ABCD",
            "intitule": "Serveur H/F",
            "entreprise": { "nom": "Hôtel du Lac" },
            "lieuTravail": { "libelle": "74 - ANNECY" },
            "typeContrat": "SAI",
            "dureeTravailLibelle": "39H Horaires normaux",
            "salaire": { "libelle": "Mensuel de 1900 Euros" },
            "origineOffre": { "urlOrigine": "https://candidat.francetravail.fr/offres/180ABCD" },
            "dateCreation": "2026-04-02T09:12:44.000Z"
        }))
        .unwrap();

        assert_eq!(offer.id.as_deref(), Some("180ABCD"));
        assert_eq!(offer.entreprise.unwrap().nom.as_deref(), Some("Hôtel du Lac"));
        assert_eq!(offer.lieu_travail.unwrap().libelle.as_deref(), Some("74 - ANNECY"));
        assert_eq!(offer.type_contrat.as_deref(), Some("SAI"));
        assert_eq!(
            offer.origine_offre.unwrap().url_origine.as_deref(),
            Some("https://candidat.francetravail.fr/offres/180ABCD")
        );
    }

    #[test]
    fn test_wrong_types_degrade_to_absent() {
        let offer: RawOffer = serde_json::from_value(json!({
            "id": 42,
            "intitule": ["not", "a", "string"],
            "entreprise": "Hôtel du Lac",
            "salaire": { "libelle": 1900 },
            "description": null
        }))
        .unwrap();

        assert_eq!(offer.id.as_deref(), Some("42"));
        assert!(offer.intitule.is_none());
        assert!(offer.entreprise.is_none());
        assert!(offer.salaire.unwrap().libelle.is_none());
        assert!(offer.description.is_none());
    }

    #[test]
    fn test_search_results_without_resultats() {
        let results: SearchResults = serde_json::from_value(json!({ "filtresPossibles": [] })).unwrap();
        assert!(results.resultats.is_none());

        assert!(results.into_offers().is_empty());

        let results: SearchResults =
            serde_json::from_value(json!({ "resultats": [{ "intitule": "Plongeur" }, {}] })).unwrap();
        assert_eq!(results.into_offers().len(), 2);

        let results: SearchResults = serde_json::from_value(json!({ "resultats": "none" })).unwrap();
        assert!(results.into_offers().is_empty());
    }

    #[test]
    fn test_malformed_entries_do_not_drop_the_rest() {
        let results: SearchResults = serde_json::from_value(json!({
            "resultats": [
                { "intitule": "Serveur logé" },
                "garbage",
                17,
                null,
                { "id": "B2", "intitule": "Plongeur", "description": "Logement fourni" }
            ]
        }))
        .unwrap();

        let offers = results.into_offers();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].intitule.as_deref(), Some("Serveur logé"));
        assert_eq!(offers[1].id.as_deref(), Some("B2"));
    }
}
