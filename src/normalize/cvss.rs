use std::collections::HashMap;

use crate::models::{
    AttackComplexity, AttackVector, CvssVector, Impact, Metric, PrivilegesRequired, Scope,
    UserInteraction, ValidationError, Vocabulary,
};

/// Parse the base metrics out of a CVSS v3 vector string.
///
/// Segments without a `:` and keys outside the base group (the `CVSS:3.x`
/// prefix, temporal and environmental metrics) are skipped. The first
/// occurrence of a repeated key wins. Every missing or unrecognized base
/// metric is reported.
pub fn parse_vector(raw: &str) -> Result<CvssVector, Vec<ValidationError>> {
    let mut values: HashMap<Metric, &str> = HashMap::new();
    for segment in raw.split('/') {
        let Some((key, value)) = segment.split_once(':') else {
            continue;
        };
        if let Some(metric) = Metric::from_cvss_key(key) {
            values.entry(metric).or_insert(value.trim());
        }
    }

    let mut errors = Vec::new();
    let attack_vector = component::<AttackVector>(Metric::AttackVector, &values, &mut errors);
    let attack_complexity =
        component::<AttackComplexity>(Metric::AttackComplexity, &values, &mut errors);
    let privileges_required =
        component::<PrivilegesRequired>(Metric::PrivilegesRequired, &values, &mut errors);
    let user_interaction =
        component::<UserInteraction>(Metric::UserInteraction, &values, &mut errors);
    let scope = component::<Scope>(Metric::Scope, &values, &mut errors);
    let confidentiality = component::<Impact>(Metric::Confidentiality, &values, &mut errors);
    let integrity = component::<Impact>(Metric::Integrity, &values, &mut errors);
    let availability = component::<Impact>(Metric::Availability, &values, &mut errors);

    match (
        attack_vector,
        attack_complexity,
        privileges_required,
        user_interaction,
        scope,
        confidentiality,
        integrity,
        availability,
    ) {
        (Some(av), Some(ac), Some(pr), Some(ui), Some(s), Some(c), Some(i), Some(a)) => {
            Ok(CvssVector {
                attack_vector: av,
                attack_complexity: ac,
                privileges_required: pr,
                user_interaction: ui,
                scope: s,
                confidentiality: c,
                integrity: i,
                availability: a,
            })
        }
        _ => Err(errors),
    }
}

fn component<V: Vocabulary>(
    metric: Metric,
    values: &HashMap<Metric, &str>,
    errors: &mut Vec<ValidationError>,
) -> Option<V> {
    let Some(raw) = values.get(&metric) else {
        errors.push(ValidationError::MissingField(metric));
        return None;
    };
    let parsed = V::from_code(raw);
    if parsed.is_none() {
        errors.push(ValidationError::InvalidValue(metric, raw.to_string()));
    }
    parsed
}
