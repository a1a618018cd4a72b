use serde::{Deserialize, Serialize};

use super::enemy::EnemyDefinition;

/// A piece of battle-only presentation state. The intro reveals a fixed set
/// of these and `ClearBattleUi` releases them again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleElement {
    EnemySprite,
    TauntBubble,
    Backdrop,
    Dialogue,
    ActionPrompt,
    EnemyInfo,
    PartyPanel,
}

impl BattleElement {
    /// Everything the intro layout reveals, back to front.
    pub const INTRO_LAYOUT: [BattleElement; 7] = [
        BattleElement::EnemySprite,
        BattleElement::TauntBubble,
        BattleElement::Backdrop,
        BattleElement::Dialogue,
        BattleElement::ActionPrompt,
        BattleElement::EnemyInfo,
        BattleElement::PartyPanel,
    ];
}

/// What the presentation layer needs to lay out a freshly revealed enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterView {
    pub enemy: EnemyDefinition,
    /// Dialogue box text: the "appeared" announcement plus the enemy's quote.
    pub dialogue: String,
    /// Info panel text with appearance, trait and weakness.
    pub info: String,
    /// Prompt telling the player which key attacks.
    pub prompt: String,
    /// Pre-formatted party panel rows.
    pub party: Vec<String>,
}

/// A fire-and-forget instruction for whatever renders the encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PresentationCommand {
    ShowEnemyIntro(EncounterView),
    /// `line` is the raw taunt, `text` the rendered speech bubble.
    ShowTaunt { line: String, text: String },
    HideTaunt,
    ShowResolution { text: String, prompt: String },
    ClearBattleUi { released: Vec<BattleElement> },
}

impl PresentationCommand {
    /// Short name used in logs and by the simulator.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ShowEnemyIntro(_) => "ShowEnemyIntro",
            Self::ShowTaunt { .. } => "ShowTaunt",
            Self::HideTaunt => "HideTaunt",
            Self::ShowResolution { .. } => "ShowResolution",
            Self::ClearBattleUi { .. } => "ClearBattleUi",
        }
    }

    /// Hand this command to a presenter.
    pub fn dispatch<P: Presenter + ?Sized>(self, presenter: &mut P) {
        match self {
            Self::ShowEnemyIntro(view) => presenter.show_enemy_intro(view),
            Self::ShowTaunt { line, text } => presenter.show_taunt(&line, &text),
            Self::HideTaunt => presenter.hide_taunt(),
            Self::ShowResolution { text, prompt } => presenter.show_resolution(&text, &prompt),
            Self::ClearBattleUi { released } => presenter.clear_battle_ui(&released),
        }
    }
}

/// The rendering side of the encounter loop.
pub trait Presenter {
    fn show_enemy_intro(&mut self, view: EncounterView);
    fn show_taunt(&mut self, line: &str, text: &str);
    fn hide_taunt(&mut self);
    fn show_resolution(&mut self, text: &str, prompt: &str);
    fn clear_battle_ui(&mut self, released: &[BattleElement]);
}
