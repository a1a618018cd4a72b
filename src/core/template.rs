/// Message templates — parsing and rendering of battle dialogue text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::enemy::EnemyDefinition;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("unknown template field '{0}'")]
    UnknownField(String),
}

/// A value a template can interpolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Id,
    Name,
    Quote,
    Appearance,
    Trait,
    Weakness,
    /// The taunt line being shown; empty outside taunts.
    Line,
}

impl Field {
    fn parse(name: &str) -> Result<Field, TemplateError> {
        match name {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "quote" => Ok(Self::Quote),
            "appearance" => Ok(Self::Appearance),
            "trait" => Ok(Self::Trait),
            "weakness" => Ok(Self::Weakness),
            "line" => Ok(Self::Line),
            other => Err(TemplateError::UnknownField(other.to_string())),
        }
    }
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Enemy field interpolation: `{weakness}`.
    Field(Field),
}

/// A parsed message template: a sequence of literal and field segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub segments: Vec<Segment>,
}

impl MessageTemplate {
    /// Parse a template string.
    ///
    /// Syntax:
    /// - `{field}` → `Field`, one of `id`, `name`, `quote`, `appearance`,
    ///   `trait`, `weakness`, `line`
    /// - `{{` / `}}` → literal braces
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<MessageTemplate, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            match chars[i] {
                '{' if i + 1 < len && chars[i + 1] == '{' => {
                    literal_buf.push('{');
                    i += 2;
                }
                '{' => {
                    if !literal_buf.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal_buf)));
                    }

                    let start = i + 1;
                    let mut end = start;
                    while end < len && chars[end] != '}' {
                        if chars[end] == '{' {
                            return Err(TemplateError::Parse(
                                "nested braces are not allowed".to_string(),
                            ));
                        }
                        end += 1;
                    }
                    if end == len {
                        return Err(TemplateError::Parse("unclosed brace".to_string()));
                    }

                    let content: String = chars[start..end].iter().collect();
                    let content = content.trim();
                    if content.is_empty() {
                        return Err(TemplateError::Parse("empty braces".to_string()));
                    }
                    segments.push(Segment::Field(Field::parse(content)?));
                    i = end + 1;
                }
                '}' if i + 1 < len && chars[i + 1] == '}' => {
                    literal_buf.push('}');
                    i += 2;
                }
                '}' => {
                    return Err(TemplateError::Parse(
                        "unmatched closing brace".to_string(),
                    ));
                }
                c => {
                    literal_buf.push(c);
                    i += 1;
                }
            }
        }

        if !literal_buf.is_empty() {
            segments.push(Segment::Literal(literal_buf));
        }

        Ok(MessageTemplate { segments })
    }

    /// Render against an enemy and, for taunts, the current line.
    pub fn render(&self, enemy: &EnemyDefinition, line: Option<&str>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(match field {
                    Field::Id => enemy.id.as_str(),
                    Field::Name => &enemy.name,
                    Field::Quote => &enemy.quote,
                    Field::Appearance => &enemy.appearance,
                    Field::Trait => &enemy.trait_text,
                    Field::Weakness => &enemy.weakness,
                    Field::Line => line.unwrap_or(""),
                }),
            }
        }
        out
    }

    /// True if the template references `field` anywhere.
    pub fn uses(&self, field: Field) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Field(f) if *f == field))
    }
}
