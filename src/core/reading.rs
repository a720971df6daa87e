use crate::domain::model::LeadPayload;
use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

pub fn life_path_meaning(number: u32) -> Option<&'static str> {
    let meaning = match number {
        1 => "vous êtes un leader naturel, indépendant et pionnier",
        2 => "vous êtes un diplomate, coopératif et sensible aux autres",
        3 => "vous êtes créatif, expressif et communicatif",
        4 => "vous êtes travailleur, organisé et fiable",
        5 => "vous êtes aventurier, curieux et aimez la liberté",
        6 => "vous êtes protecteur, aimant et orienté famille",
        7 => "vous êtes introspectif, spirituel et analytique",
        8 => "vous êtes ambitieux, matérialiste et orienté succès",
        9 => "vous êtes humanitaire, généreux et visionnaire",
        11 => "vous êtes intuitif, inspirateur et idéaliste",
        22 => "vous êtes un maître constructeur, visionnaire et pratique",
        _ => return None,
    };
    Some(meaning)
}

/// "15 août 1990"; an unparseable date leaves the pieces blank.
fn spelled_birth_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => format!(
            "{} {} {}",
            date.day(),
            MONTH_NAMES[date.month0() as usize],
            date.year()
        ),
        Err(_) => "  ".to_string(),
    }
}

/// Personalized reading shown (and read aloud) after a submission.
pub fn personalized_text(payload: &LeadPayload) -> String {
    let number = payload.life_path_number.value();
    let meaning = life_path_meaning(number).unwrap_or("vous avez un chemin unique");

    format!(
        "Bonjour {} ! Merci d'avoir partagé vos informations avec nous. \n\
         Né le {}, votre chemin de vie numéro {} révèle des aspects fascinants de votre personnalité. \n\
         Selon la numérologie, {}. \n\
         Votre adresse email {} a été enregistrée pour vous envoyer votre analyse complète. \n\
         Cette lecture personnalisée vous aidera à mieux comprendre vos forces naturelles et votre mission de vie.",
        payload.first_name,
        spelled_birth_date(&payload.birth_date),
        number,
        meaning,
        payload.email,
    )
}

/// Splits a reading into subtitle lines.
pub fn text_segments(text: &str) -> Vec<String> {
    text.split(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
