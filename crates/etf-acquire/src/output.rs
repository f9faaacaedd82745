use anyhow::Result;
use etf_model::EtfList;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

/// Write the records as a JSON array indented by one space per level,
/// followed by a newline.
///
/// `&`, `<` and `>` are written literally rather than as `\u0026`-style
/// escapes; the decoded strings are identical.
pub fn write_json<W: Write>(mut writer: W, infos: &EtfList) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    infos.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::debug!(records = infos.len(), "Wrote JSON output");
    Ok(())
}

pub fn to_json_string(infos: &EtfList) -> Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, infos)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use etf_model::EtfInfo;

    #[test]
    fn test_one_space_indent() {
        let mut list = EtfList::default();
        list.push(EtfInfo {
            title: "Xtrackers MSCI World".into(),
            replication: "Physical".into(),
            earnings: "Accumulating".into(),
            total_expense_ratio: "0.19% p.a.".into(),
            tracking_difference: "-0.05%".into(),
            fund_size: "EUR 4,200 m".into(),
        });

        let json = to_json_string(&list).unwrap();
        let expected = "[\n {\n  \"Title\": \"Xtrackers MSCI World\",\n  \"Replication\": \"Physical\",\n  \"Earnings\": \"Accumulating\",\n  \"TotalExpenseRatio\": \"0.19% p.a.\",\n  \"TrackingDifference\": \"-0.05%\",\n  \"FundSize\": \"EUR 4,200 m\"\n }\n]\n";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_empty_list() {
        let json = to_json_string(&EtfList::default()).unwrap();
        assert_eq!(json, "[]\n");
    }

    #[test]
    fn test_empty_record_keeps_all_keys() {
        let mut list = EtfList::default();
        list.push(EtfInfo::default());
        let json = to_json_string(&list).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let obj = value[0].as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert!(obj.values().all(|v| v == ""));
    }

    #[test]
    fn test_html_characters_not_escaped() {
        let mut list = EtfList::default();
        list.push(EtfInfo {
            title: "iShares Core S&P 500 <Acc>".into(),
            ..Default::default()
        });
        let json = to_json_string(&list).unwrap();
        assert!(json.contains(r#""Title": "iShares Core S&P 500 <Acc>""#), "{json}");
    }
}
