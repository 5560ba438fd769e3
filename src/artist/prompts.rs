// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt tiers for the sketch finisher
//!
//! Tiers are ordered from most style-faithful to most conservative. Every
//! prompt is a pure function of the tier and the style.

use super::style::ArtStyle;

/// Composition clause shared by all tier-0 prompts
pub const COMPOSITION_RULE: &str = "출력 이미지는 정사각형 캔버스 전체를 여백 없이 꽉 채워야 하고, \
     사용자 밑그림의 구도·형태·배치·비율·포즈를 거의 그대로 유지해줘. \
     형태와 구성을 바꾸지 말고 스타일만 변환해줘.";

/// Composition clause shared by all tier-1 prompts
pub const PRESERVE_COMPOSITION: &str = "Preserve the exact same composition";

/// Tier-2 prompt, identical for every style
pub const UNIVERSAL_PROMPT: &str = "Create a simple, abstract, colorful and family-friendly \
     artwork based on this image. Safe for all ages. Stylized only.";

/// Wording for the character styles (princess, robot)
struct CharacterWording {
    name_ko: &'static str,
    traits_ko: &'static str,
    finish_ko: &'static str,
    name_en: &'static str,
    traits_en: &'static str,
    adjective_en: &'static str,
}

const PRINCESS: CharacterWording = CharacterWording {
    name_ko: "공주님",
    traits_ko: "의상·분위기",
    finish_ko: "아름다운 공주님 느낌으로",
    name_en: "princess",
    traits_en: "dress, crown, etc.",
    adjective_en: "beautiful",
};

const ROBOT: CharacterWording = CharacterWording {
    name_ko: "로봇",
    traits_ko: "금속·기계 느낌",
    finish_ko: "로봇 느낌으로",
    name_en: "robot",
    traits_en: "metal, mechanical",
    adjective_en: "cool",
};

fn character_wording(style: &ArtStyle) -> Option<&'static CharacterWording> {
    match style {
        ArtStyle::Princess => Some(&PRINCESS),
        ArtStyle::Robot => Some(&ROBOT),
        _ => None,
    }
}

/// One ranked prompt variant in the fallback sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PromptTier {
    /// Style-faithful prompt
    Faithful,
    /// Safety-emphasizing prompt, style-specific for character styles
    Safe,
    /// Style-independent fallback
    Universal,
}

impl PromptTier {
    /// All tiers in attempt order
    pub const ALL: [PromptTier; 3] = [Self::Faithful, Self::Safe, Self::Universal];

    pub fn rank(self) -> u8 {
        match self {
            Self::Faithful => 0,
            Self::Safe => 1,
            Self::Universal => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Faithful => "faithful",
            Self::Safe => "safe",
            Self::Universal => "universal",
        }
    }

    /// Prompt text for this tier and style
    pub fn prompt(self, style: &ArtStyle) -> String {
        match self {
            Self::Faithful => faithful_prompt(style),
            Self::Safe => safe_prompt(style),
            Self::Universal => UNIVERSAL_PROMPT.to_string(),
        }
    }
}

fn faithful_prompt(style: &ArtStyle) -> String {
    match character_wording(style) {
        Some(w) => format!(
            "사용자 밑그림(스케치)을 그대로 따라가줘. 밑그림의 선·형태·포즈·구도·비율·배치를 \
             변경하지 말고 거의 동일하게 유지한 채, {} 스타일({})만 입혀서 변환해줘. {} \
             결과물의 형태와 구도는 밑그림과 거의 같아야 해. {} 마무리해줘.",
            w.name_ko, w.traits_ko, COMPOSITION_RULE, w.finish_ko
        ),
        None => format!(
            "사용자가 그린 스케치를 기반으로 선 느낌은 최대한 유지하되, 전체를 '{}' 스타일의 \
             완성된 작품처럼 고퀄로 정리해줘. {} 배경/명암/디테일을 자연스럽게 보완하고 \
             결과가 예쁘게 나오도록.",
            style.label(),
            COMPOSITION_RULE
        ),
    }
}

fn safe_prompt(style: &ArtStyle) -> String {
    match character_wording(style) {
        Some(w) => format!(
            "Transform this user sketch into a {name} character. CRITICAL: {preserve}, pose, \
             proportions, shape, and layout as the sketch; do not alter the figure or \
             arrangement. Only apply {name} style ({traits}). Fill the entire square canvas \
             with no margins. Family-friendly, {adjective} {name} style only.",
            name = w.name_en,
            preserve = PRESERVE_COMPOSITION,
            traits = w.traits_en,
            adjective = w.adjective_en,
        ),
        None => format!(
            "Transform this user sketch into a completely safe, family-friendly artwork. \
             {}, pose, and layout as the sketch. Fill the entire square canvas with no \
             margins. Apply '{}' style. Ensure the result is appropriate for all ages. \
             Output a clean, artistic image only.",
            PRESERVE_COMPOSITION,
            style.label()
        ),
    }
}
