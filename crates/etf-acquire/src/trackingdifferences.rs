use crate::fetch::PageSource;
use etf_model::{DescField, EtfInfo, EtfList};
use scraper::{ElementRef, Html, Selector};

pub const BASE_URL: &str = "https://www.trackingdifferences.com/ETF/ISIN/";

/// Hosts the fetcher may talk to.
pub const ALLOWED_DOMAINS: &[&str] = &["www.trackingdifferences.com", "trackingdifferences.com"];

/// Funds scraped on every run.
pub const ISINS: &[&str] = &["IE00B1XNHC34", "IE00B4L5Y983", "LU1838002480"];

/// Build the fund page URL for an ISIN. The identifier is appended as-is.
pub fn scrape_url(isin: &str) -> String {
    format!("{BASE_URL}{isin}")
}

/// Visit every ISIN in order and collect one record per identifier.
///
/// A page that fails to load still yields a record, with every field empty,
/// so the output always lines up with the input list.
pub async fn scrape_all<S: PageSource>(source: &S, isins: &[&str]) -> EtfList {
    let mut infos = EtfList::with_capacity(isins.len());

    for isin in isins {
        let url = scrape_url(isin);
        tracing::info!(url = %url, "[*] Visiting {url}");

        let info = match source.fetch(&url).await {
            Ok(html) => {
                tracing::debug!(bytes = html.len(), "Received HTML");
                parse_etf_page(&html)
            }
            Err(e) => {
                tracing::error!(isin = %isin, "[!] Error: {}", e.report());
                EtfInfo::default()
            }
        };

        tracing::info!(isin = %isin, fields = info.filled_fields(), "Scraped record");
        infos.push(info);
    }

    infos
}

/// Extract the title and the labelled key facts from a fund page.
///
/// Missing or malformed structure leaves the affected fields empty.
pub fn parse_etf_page(html: &str) -> EtfInfo {
    let document = Html::parse_document(html);

    let title_sel = Selector::parse("h1.page-title").expect("valid selector");
    let desc_sel = Selector::parse("div.descfloat p.desc").expect("valid selector");
    let label_sel = Selector::parse("span.desctitle").expect("valid selector");

    let mut info = EtfInfo::default();

    if let Some(h1) = document.select(&title_sel).next() {
        info.title = h1.text().collect();
    }

    // Document order, so a repeated label overwrites the earlier value
    for desc in document.select(&desc_sel) {
        if let Some((field, value)) = extract_description(desc, &label_sel) {
            tracing::debug!(field = %field, value = %value, "Extracted field");
            info.set_field(field, value);
        }
    }

    info
}

/// Read one description block of the form
/// `<span class="desctitle">Label</span><br><span>Value</span>`.
///
/// Only element children are counted; blocks without exactly three are skipped.
fn extract_description(desc: ElementRef, label_sel: &Selector) -> Option<(DescField, String)> {
    let children: Vec<ElementRef> = desc.children().filter_map(ElementRef::wrap).collect();
    if children.len() != 3 {
        tracing::trace!(children = children.len(), "Skipping description block");
        return None;
    }

    let label: String = desc.select(label_sel).flat_map(|e| e.text()).collect();
    let label = label.trim();

    let Some(field) = DescField::from_label(label) else {
        tracing::trace!(label = %label, "Ignoring unrecognised label");
        return None;
    };

    Some((field, children[2].text().collect()))
}
