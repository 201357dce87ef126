use std::time::Duration;

use serde::Deserialize;

/// Coarse geographic region derived from a country code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
	Europe,
	MiddleEast,
	Asia,
	Americas,
	Global,
}

impl Region {
	pub fn as_str(&self) -> &'static str {
		match self {
			Region::Europe => "europe",
			Region::MiddleEast => "middle_east",
			Region::Asia => "asia",
			Region::Americas => "americas",
			Region::Global => "global",
		}
	}
}

/// Map an ISO 3166 country code to a region. Unknown codes are global.
pub fn region_for(country_code: &str) -> Region {
	match country_code {
		"GB" | "IE" | "FR" | "DE" | "NL" | "BE" | "LU" | "ES" | "PT" | "IT"
		| "CH" | "AT" | "SE" | "NO" | "DK" | "FI" | "PL" | "CZ" | "SK" | "HU"
		| "RO" | "BG" | "GR" | "UA" | "EE" | "LV" | "LT" => Region::Europe,
		"SA" | "AE" | "IL" | "TR" | "IR" | "IQ" | "JO" | "LB" | "KW" | "QA"
		| "BH" | "OM" | "YE" | "SY" | "EG" => Region::MiddleEast,
		"CN" | "JP" | "KR" | "TW" | "HK" | "SG" | "IN" | "TH" | "VN" | "MY"
		| "PH" | "ID" | "PK" | "BD" => Region::Asia,
		"US" | "CA" | "MX" | "BR" | "AR" | "CL" | "CO" | "PE" => Region::Americas,
		_ => Region::Global,
	}
}

/// Where this run is measuring from, as reported by the geo lookup.
///
/// Every field degrades to "unknown" (region: global) when the lookup
/// fails; the benchmark itself never depends on any of this.
#[derive(Debug, Clone)]
pub struct LocationInfo {
	pub ip: String,
	pub country: String,
	pub country_code: String,
	pub city: String,
	pub isp: String,
	pub as_number: String,
	pub region: Region,
}

impl LocationInfo {
	pub fn unknown() -> Self {
		Self {
			ip: "unknown".to_string(),
			country: "unknown".to_string(),
			country_code: "unknown".to_string(),
			city: "unknown".to_string(),
			isp: "unknown".to_string(),
			as_number: "unknown".to_string(),
			region: Region::Global,
		}
	}

	/// "City, Country" when both are known, otherwise "unknown".
	pub fn display_location(&self) -> String {
		if self.city == "unknown" && self.country == "unknown" {
			"unknown".to_string()
		} else if self.city == "unknown" {
			self.country.clone()
		} else {
			format!("{}, {}", self.city, self.country)
		}
	}
}

/// Response schema of ip-api.com/json. Absent fields default to empty.
#[derive(Debug, Deserialize)]
struct GeoApiResponse {
	#[serde(default)]
	status: String,
	#[serde(default)]
	query: String,
	#[serde(default)]
	country: String,
	#[serde(rename = "countryCode", default)]
	country_code: String,
	#[serde(default)]
	city: String,
	#[serde(default)]
	isp: String,
	#[serde(rename = "as", default)]
	as_number: String,
}

const GEO_API_URL: &str = "http://ip-api.com/json/";

fn field_or_unknown(value: String) -> String {
	if value.is_empty() {
		"unknown".to_string()
	} else {
		value
	}
}

impl From<GeoApiResponse> for LocationInfo {
	fn from(geo: GeoApiResponse) -> Self {
		let region = region_for(&geo.country_code);
		Self {
			ip: field_or_unknown(geo.query),
			country: field_or_unknown(geo.country),
			country_code: field_or_unknown(geo.country_code),
			city: field_or_unknown(geo.city),
			isp: field_or_unknown(geo.isp),
			as_number: field_or_unknown(geo.as_number),
			region,
		}
	}
}

/// Look up the public IP and location of this vantage point.
///
/// Best effort only: any HTTP, timeout, or decode failure yields the
/// unknown fallback and the run proceeds.
pub async fn lookup(timeout: Duration) -> LocationInfo {
	let client = match reqwest::Client::builder().timeout(timeout).build() {
		Ok(c) => c,
		Err(_) => return LocationInfo::unknown(),
	};

	let response = match client.get(GEO_API_URL).send().await {
		Ok(r) => r,
		Err(_) => return LocationInfo::unknown(),
	};

	match response.json::<GeoApiResponse>().await {
		Ok(geo) if geo.status == "success" => LocationInfo::from(geo),
		_ => LocationInfo::unknown(),
	}
}
