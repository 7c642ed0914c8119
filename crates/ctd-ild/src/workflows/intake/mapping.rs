use super::normalizer::section_lookup_key;
use crate::workflows::assessment::SectionId;
use std::collections::HashMap;
use std::sync::OnceLock;

static SECTION_ALIAS_MAP: OnceLock<HashMap<String, SectionId>> = OnceLock::new();

pub(crate) fn section_for_label(label: &str) -> Option<SectionId> {
    section_alias_map().get(&section_lookup_key(label)).copied()
}

fn section_alias_map() -> &'static HashMap<String, SectionId> {
    SECTION_ALIAS_MAP.get_or_init(|| {
        const ALIASES: &[(&str, SectionId)] = &[
            ("anamnesis", SectionId::Anamnese),
            ("clinicalexam", SectionId::Clinical),
            ("standardbiology", SectionId::StandardBio),
            ("biology", SectionId::StandardBio),
            ("immunology", SectionId::TargetedImmuno),
            ("targetedimmunology", SectionId::TargetedImmuno),
            ("pft", SectionId::Imaging),
            ("hrct", SectionId::Imaging),
            ("pattern", SectionId::Patterns),
            ("selectedpattern", SectionId::Patterns),
            ("candidates", SectionId::Correlation),
            ("selecteddiagnoses", SectionId::Correlation),
            ("essentialtestsinputs", SectionId::EssentialTests),
            ("essential", SectionId::EssentialTests),
            ("treatment", SectionId::TreatmentPlan),
            ("treatmentplaninputs", SectionId::TreatmentPlan),
            ("followupinputs", SectionId::FollowUp),
            ("monitoring", SectionId::FollowUp),
        ];

        let mut map: HashMap<String, SectionId> = SectionId::ordered()
            .into_iter()
            .map(|section| (section_lookup_key(section.key()), section))
            .collect();
        for (alias, section) in ALIASES {
            map.insert(section_lookup_key(alias), *section);
        }
        map
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(label: &str) -> Option<SectionId> {
    section_for_label(label)
}
