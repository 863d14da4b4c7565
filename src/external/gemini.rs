use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    config: GeminiConfig,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// 调用 generateContent 编辑商品图。单次尝试，不重试。
    /// 返回 Ok(None) 表示模型没有返回图片部件（与传输失败区分开）。
    pub async fn edit_image(&self, image: &str, instruction: &str) -> AppResult<Option<String>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "image/png".to_string(),
                            data: strip_data_uri_prefix(image).to_string(),
                        }),
                    },
                    Part {
                        text: Some(format!(
                            "Edit this product image based on the following instruction: {instruction}. Return the edited image."
                        )),
                        inline_data: None,
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApiError(format!(
                "Gemini image edit failed: {status} {body}"
            )));
        }

        let result: GenerateContentResponse = response.json().await?;

        let edited = result
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.inline_data)
            .map(|d| format!("data:image/png;base64,{}", d.data));

        Ok(edited)
    }
}

/// 去掉 `data:*;base64,` 前缀，裸 base64 原样返回
fn strip_data_uri_prefix(image: &str) -> &str {
    if image.starts_with("data:") {
        image.split_once(',').map_or(image, |(_, data)| data)
    } else {
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_uri_prefix() {
        assert_eq!(
            strip_data_uri_prefix("data:image/png;base64,AAAA"),
            "AAAA"
        );
        assert_eq!(strip_data_uri_prefix("AAAA"), "AAAA");
        // 没有逗号的畸形 data URI 原样透传
        assert_eq!(strip_data_uri_prefix("data:image/png"), "data:image/png");
    }

    #[test]
    fn test_response_parsing_picks_first_inline_data() {
        let raw = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [
                            {"text": "here is the image"},
                            {"inlineData": {"mimeType": "image/png", "data": "QkJC"}}
                        ]
                    }
                }
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let data = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.inline_data)
            .map(|d| d.data);
        assert_eq!(data.as_deref(), Some("QkJC"));
    }

    #[test]
    fn test_response_without_image_part_is_none() {
        let raw = r#"{"candidates": [{"content": {"parts": [{"text": "no image"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let data = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.inline_data);
        assert!(data.is_none());
    }
}
