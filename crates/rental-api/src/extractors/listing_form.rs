//! Multipart form shared by the create and update endpoints.

use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Request};
use chrono::NaiveDate;

use rental_core::error::AppError;
use rental_entity::advertisement::PriceTiers;
use rental_service::advertisement::{NewAdvertisement, UpdateAdvertisement};
use rental_service::media::UploadedFile;

use crate::error::ApiError;

/// Every field a listing form may carry.
///
/// Text fields are kept as received; presence and length checks happen in
/// the service so both endpoints report them the same way.
#[derive(Debug, Clone, Default)]
pub struct ListingForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub place: Option<String>,
    pub category_name: Option<String>,
    pub prices: PriceTiers,
    pub days: Vec<NaiveDate>,
    pub images: Vec<UploadedFile>,
    pub video: Option<UploadedFile>,
    /// Stored image keys to keep on update.
    pub previous_images: Vec<String>,
    /// Stored video key to keep on update.
    pub previous_video: Option<String>,
}

impl ListingForm {
    /// Read all parts of a multipart body.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "images" => {
                    if let Some(file) = read_file(field).await? {
                        form.images.push(file);
                    }
                }
                "video" => form.video = read_file(field).await?,
                _ => {
                    let value = read_text(field).await?;
                    form.apply_text(&name, value)?;
                }
            }
        }

        Ok(form)
    }

    fn apply_text(&mut self, name: &str, value: String) -> Result<(), AppError> {
        match name {
            "title" => self.title = Some(value),
            "description" => self.description = Some(value),
            "place" => self.place = Some(value),
            "categoryName" => self.category_name = Some(value),
            "hourPrice" => self.prices.hour = parse_price(name, &value)?,
            "dayPrice" => self.prices.day = parse_price(name, &value)?,
            "weekPrice" => self.prices.week = parse_price(name, &value)?,
            "monthPrice" => self.prices.month = parse_price(name, &value)?,
            "days" => self.days.extend(parse_days(&value)?),
            "previousImages" => self.previous_images.extend(
                split_list(&value).map(|v| storage_key(v).to_string()),
            ),
            "previousVideo" => {
                self.previous_video = split_list(&value).next().map(|v| storage_key(v).to_string())
            }
            _ => {}
        }
        Ok(())
    }

    /// Fields of a new listing.
    pub fn into_new(
        self,
    ) -> Result<(NewAdvertisement, Vec<UploadedFile>, Option<UploadedFile>), AppError> {
        let input = NewAdvertisement {
            title: required("title", self.title)?,
            description: required("description", self.description)?,
            place: required("place", self.place)?,
            category_name: required("categoryName", self.category_name)?,
            prices: self.prices,
            days: self.days,
        };
        Ok((input, self.images, self.video))
    }

    /// Fields of a resubmitted listing.
    pub fn into_update(
        self,
    ) -> Result<(UpdateAdvertisement, Vec<UploadedFile>, Option<UploadedFile>), AppError> {
        let input = UpdateAdvertisement {
            title: required("title", self.title)?,
            description: required("description", self.description)?,
            place: required("place", self.place)?,
            category_name: required("categoryName", self.category_name)?,
            prices: self.prices,
            days: self.days,
            previous_images: self.previous_images,
            previous_video: self.previous_video,
        };
        Ok((input, self.images, self.video))
    }
}

impl<S> FromRequest<S> for ListingForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        Ok(Self::from_multipart(multipart).await?)
    }
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}

/// Empty file inputs arrive as parts with no name and no bytes; they are skipped.
async fn read_file(field: Field<'_>) -> Result<Option<UploadedFile>, AppError> {
    let file_name = field
        .file_name()
        .map(String::from)
        .filter(|n| !n.is_empty());
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))?;

    if file_name.is_none() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(UploadedFile {
        file_name,
        content_type,
        bytes,
    }))
}

fn required(name: &str, value: Option<String>) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::validation(format!("{name} is required")))
}

/// Empty strings mean "no price".
fn parse_price(name: &str, raw: &str) -> Result<Option<f64>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(Some(price)),
        _ => Err(AppError::validation(format!("{name} must be a number"))),
    }
}

/// Accepts one ISO date or a comma-separated list of them.
fn parse_days(raw: &str) -> Result<Vec<NaiveDate>, AppError> {
    split_list(raw)
        .map(|day| {
            day.parse::<NaiveDate>()
                .map_err(|_| AppError::validation(format!("Invalid date '{day}', expected YYYY-MM-DD")))
        })
        .collect()
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|v| !v.is_empty())
}

/// Clients may send back the media URLs they were given; keys are the last path segment.
fn storage_key(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}
