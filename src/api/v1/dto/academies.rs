/*
 * Responsibility
 * - Academies の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademyRequest {
    pub name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
}

impl AcademyRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if let Some(logo_url) = &self.logo_url
            && Url::parse(logo_url).is_err()
        {
            return Err("logoUrl must be a valid URL");
        }
        if let Some(color) = &self.primary_color
            && !is_hex_color(color)
        {
            return Err("primaryColor must be a #rgb or #rrggbb hex color");
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademyResponse {
    pub academy_number: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
}

#[cfg(test)]
#[path = "academies_test.rs"]
mod tests;
