use crate::domain::model::{CommuneRecord, Link, Paragraph, Severity, TaxDetails, TaxNotice, TaxType};
use crate::utils::error::Result;
use crate::utils::validation::{validate_https_url, Validate};

pub const DECREE_LINK: Link = Link {
    label: "décret",
    url: "https://www.legifrance.gouv.fr/jorf/id/JORFTEXT000053143539",
};

pub const SECONDARY_RESIDENCE_LINK: Link = Link {
    label: "Taxe d'habitation sur les résidences secondaires",
    url: "https://www.economie.gouv.fr/particuliers/impots-et-fiscalite/gerer-mes-impots-locaux/la-taxe-dhabitation-sur-les-residences-secondaires-comment-ca-marche",
};

pub const LOCAL_RATES_LINK: Link = Link {
    label: "data.gouv.fr",
    url: "https://www.data.gouv.fr/datasets/fiscalite-locale-des-particuliers",
};

pub const REFERENCE_LINKS: [Link; 3] = [DECREE_LINK, SECONDARY_RESIDENCE_LINK, LOCAL_RATES_LINK];

pub fn classify(record: &CommuneRecord) -> TaxNotice {
    notice_for(record.tax_type, &record.name)
}

pub fn notice_for(tax_type: TaxType, commune: &str) -> TaxNotice {
    match tax_type {
        TaxType::Tlv => TaxNotice {
            severity: Severity::Warning,
            title: "Votre logement se trouve dans une commune appliquant la Taxe sur les Logements Vacants (TLV)".to_string(),
            message: format!("La commune de {} est située en zone tendue.", commune),
        },
        TaxType::Thlv => TaxNotice {
            severity: Severity::Warning,
            title: "Votre logement se trouve dans une commune appliquant la Taxe d'Habitation sur les Logements Vacants (THLV)".to_string(),
            message: format!("La commune de {} a instauré la THLV.", commune),
        },
        TaxType::None => TaxNotice {
            severity: Severity::Success,
            title: "Votre logement se trouve dans une commune qui n'applique pas encore de taxe sur la vacance".to_string(),
            message: format!(
                "La commune de {} n'est pas concernée par la Taxe sur les Logements Vacants (TLV) et n'a pas instauré la Taxe d'Habitation sur les Logements Vacants (THLV).",
                commune
            ),
        },
    }
}

/// Maps a raw classification value, as found in a dataset or typed by a user.
/// Unknown values fail with `DataIntegrityError`.
pub fn classify_raw(raw: &str, commune: &str) -> Result<TaxNotice> {
    let tax_type = raw.parse::<TaxType>()?;
    Ok(notice_for(tax_type, commune))
}

pub fn fallback_notice() -> TaxNotice {
    TaxNotice {
        severity: Severity::Error,
        title: "Information indisponible".to_string(),
        message: "Nous ne pouvons pas déterminer la situation fiscale de cette commune. Contactez votre mairie ou votre intercommunalité.".to_string(),
    }
}

/// Turns a mapping failure into the generic fallback notice, logging the cause.
pub fn notice_or_fallback(result: Result<TaxNotice>) -> TaxNotice {
    result.unwrap_or_else(|e| {
        tracing::warn!("Falling back to generic notice: {}", e);
        fallback_notice()
    })
}

/// Conditions and alternatives for a taxed commune; `None` for untaxed ones.
pub fn details(tax_type: TaxType) -> Option<TaxDetails> {
    let residence = Paragraph {
        text: format!(
            "Si le logement est occupé comme résidence principale, par vous-même, un locataire, ou à titre gratuit, vous n'êtes pas redevable de cette taxe. Si vous l'occupez comme résidence secondaire, vous serez redevable de la {} dès la première année.",
            SECONDARY_RESIDENCE_LINK.label
        ),
        links: vec![SECONDARY_RESIDENCE_LINK],
    };

    let (conditions, closing) = match tax_type {
        TaxType::None => return None,
        TaxType::Tlv => (
            vec![
                Paragraph {
                    text: format!(
                        "La taxe s'applique dans les zones tendues définies par {}",
                        DECREE_LINK.label
                    ),
                    links: vec![DECREE_LINK],
                },
                plain("Le logement doit être vacant depuis au moins 1 an au 1er janvier de l'année d'imposition"),
                plain("Le taux applicable est 17 % de la valeur locative du bien la première année, puis 34 % les années suivantes"),
            ],
            plain("Contactez votre mairie ou votre intercommunalité pour connaître les aides locales pour vous accompagner."),
        ),
        TaxType::Thlv => (
            vec![
                plain("La taxe est instituée par délibération de la commune ou de l'intercommunalité"),
                plain("Le logement doit être vacant depuis au moins 2 ans au 1er janvier de l'année d'imposition"),
                plain("Le taux applicable, fixé par la collectivité, est entre 12,5 % et 25 % de la valeur locative du bien"),
            ],
            Paragraph {
                text: format!(
                    "Pour connaître le taux d'imposition applicable, vous pouvez consulter le site {}, ou contacter votre mairie ou votre intercommunalité pour connaître également les aides locales pour vous accompagner.",
                    LOCAL_RATES_LINK.label
                ),
                links: vec![LOCAL_RATES_LINK],
            },
        ),
    };

    Some(TaxDetails {
        conditions_heading: format!("Conditions d'application de la {}", tax_type),
        conditions,
        alternatives_heading: "Quelles sont les alternatives ?".to_string(),
        alternatives: vec![residence, closing],
    })
}

impl Validate for TaxDetails {
    fn validate(&self) -> Result<()> {
        for paragraph in self.conditions.iter().chain(&self.alternatives) {
            for link in &paragraph.links {
                validate_https_url(link.label, link.url)?;
            }
        }
        Ok(())
    }
}

/// Checks the outbound links of every details section before anything is shown.
pub fn check_reference_links() -> Result<()> {
    for tax_type in TaxType::ALL {
        if let Some(sections) = details(tax_type) {
            sections.validate()?;
        }
    }
    Ok(())
}

fn plain(text: &str) -> Paragraph {
    Paragraph {
        text: text.to_string(),
        links: Vec::new(),
    }
}
