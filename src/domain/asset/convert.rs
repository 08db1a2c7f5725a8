//! Conversion: AssetResponse → Asset (TryFrom + validation).

use super::wire;
use super::{Asset, ValidationError};
use crate::shared::AssetId;

impl TryFrom<wire::AssetResponse> for Asset {
    type Error = ValidationError;

    fn try_from(source: wire::AssetResponse) -> Result<Self, Self::Error> {
        if source.id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        if source.symbol.trim().is_empty() {
            return Err(ValidationError::MissingSymbol(source.id));
        }
        let current_price = match source.current_price {
            Some(p) if p.is_finite() => p,
            Some(_) => return Err(ValidationError::NonFinitePrice(source.id)),
            None => return Err(ValidationError::MissingPrice(source.id)),
        };

        Ok(Asset {
            id: AssetId::from(source.id),
            symbol: source.symbol,
            name: source.name,
            image_url: source.image.filter(|url| !url.is_empty()),
            current_price,
            market_cap: source.market_cap,
            market_cap_rank: source.market_cap_rank,
            total_volume: source.total_volume,
            high_24h: source.high_24h,
            low_24h: source.low_24h,
            price_change_percentage_24h: source.price_change_percentage_24h,
        })
    }
}

/// Converts a whole page. One malformed row fails the page.
pub(crate) fn convert_page(rows: wire::MarketsResponse) -> Result<Vec<Asset>, ValidationError> {
    rows.into_iter().map(Asset::try_from).collect()
}
