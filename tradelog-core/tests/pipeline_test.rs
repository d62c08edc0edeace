//! End-to-end tests of the conversion pipeline over export text.

use tradelog_core::data::ColumnMap;
use tradelog_core::engine::{Diagnostic, MissingLeg};
use tradelog_core::{analyze, convert_str, ConvertOptions, CoreError, RowFault, RowPolicy};

const EN_HEADER: &str =
    "Trade #,Type,Signal,Date/Time,Price USDT,Contracts,Net P&L USDT,Net P&L %,Run-up USDT";

fn english() -> ConvertOptions {
    ConvertOptions {
        columns: ColumnMap::english(),
        ..ConvertOptions::default()
    }
}

fn export(rows: &[&str]) -> String {
    let mut text = String::from(EN_HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

#[test]
fn scenario_a_single_winning_long() {
    let text = export(&[
        r#"1,Exit long,Close,2024-02-01 08:00,110,1,50,10,60"#,
        r#"1,Entry long,EMA Long,2024-01-15 08:00,100,1,50,10,60"#,
    ]);
    let conv = convert_str(&text, &english()).unwrap();
    let doc = &conv.document;

    assert_eq!(doc.summary.years, vec!["2024"]);
    let bucket = &doc.yearly_data["2024"];
    assert_eq!(bucket.trades.len(), 1);
    assert_eq!(bucket.trades[0].entry_price, 100.0);
    assert_eq!(bucket.trades[0].exit_price, 110.0);

    let s = &doc.summary.overall_stats;
    assert_eq!(s.total_trades, 1);
    assert_eq!(s.long_wins, 1);
    assert_eq!(s.long_win_rate, 100.0);
    assert_eq!(s.total_pnl, 50.0);
    assert!(conv.diagnostics.is_empty());
}

#[test]
fn scenario_b_entry_without_exit() {
    let text = export(&["1,Entry long,EMA Long,2024-01-15 08:00,100,1,,,"]);
    let conv = convert_str(&text, &english()).unwrap();

    assert!(conv.document.yearly_data.is_empty());
    assert!(conv.document.summary.years.is_empty());
    assert_eq!(conv.document.summary.overall_stats.total_trades, 0);
    assert_eq!(
        conv.diagnostics,
        vec![Diagnostic::Unpaired {
            trade_num: 1,
            missing: MissingLeg::Exit
        }]
    );
}

#[test]
fn scenario_c_two_years_one_win_one_loss() {
    let text = export(&[
        "1,Entry long,L,2022-11-01 00:00,100,1,,,",
        "1,Exit long,X,2022-12-01 00:00,130,1,300,30,",
        "2,Entry short,S,2023-01-02 00:00,200,1,,,",
        "2,Exit short,X,2023-02-01 00:00,210,1,-100,-5,",
    ]);
    let doc = convert_str(&text, &english()).unwrap().document;

    assert_eq!(doc.summary.years, vec!["2022", "2023"]);
    assert_eq!(doc.yearly_data["2022"].stats.total_trades, 1);
    assert_eq!(doc.yearly_data["2023"].stats.total_trades, 1);
    assert_eq!(doc.yearly_data["2023"].stats.short_losses, 1);

    let overall = &doc.summary.overall_stats;
    assert_eq!(overall.total_trades, 2);
    assert_eq!(overall.total_pnl, 200.0);
    assert_eq!(overall.total_return_rate, 2.0);
    assert_eq!(overall.long_win_rate, 100.0);
    assert_eq!(overall.short_win_rate, 0.0);
}

#[test]
fn scenario_d_zero_pnl_is_a_loss() {
    let text = export(&[
        "1,Entry long,L,2024-01-01 00:00,100,1,,,",
        "1,Exit long,X,2024-01-02 00:00,100,1,0,0,",
    ]);
    let s = convert_str(&text, &english())
        .unwrap()
        .document
        .summary
        .overall_stats;
    assert_eq!(s.long_wins, 0);
    assert_eq!(s.long_losses, 1);
    assert_eq!(s.long_win_rate, 0.0);
}

#[test]
fn chinese_export_with_quoted_fields() {
    let text = "\u{feff}\"交易 #\",\"类型\",\"信号\",\"日期/时间\",\"价格 USDT\",\"合约\",\"净损益 USDT\",\"净损益 %\"\r\n\
                \"1\",\"多头出场\",\"ATR TP\",\"2023-03-09 16:00\",\"21,950.5\",\"0.45\",\"812.25\",\"8.12\"\r\n\
                \"1\",\"多头进场\",\"EMA Long\",\"2023-02-20 08:00\",\"20,150\",\"0.45\",\"812.25\",\"8.12\"\r\n\
                \"2\",\"空头进场\",\"EMA Short\",\"2023-12-30 08:00\",\"42,000\",\"0.2\",\"−120.5\",\"−1.2\"\r\n\
                \"2\",\"空头出场\",\"ATR SL\",\"2024-01-02 00:00\",\"42,600\",\"0.2\",\"−120.5\",\"−1.2\"\r\n";

    let doc = convert_str(text, &ConvertOptions::default()).unwrap().document;

    assert_eq!(doc.summary.years, vec!["2023", "2024"]);
    let t2023 = &doc.yearly_data["2023"].trades[0];
    assert_eq!(t2023.entry_price, 20_150.0);
    assert_eq!(t2023.exit_price, 21_950.5);
    assert_eq!(t2023.entry_signal, "EMA Long");

    let s2024 = &doc.yearly_data["2024"].stats;
    assert_eq!(s2024.short_trades, 1);
    assert_eq!(s2024.short_pnl, -120.5);
    assert_eq!(s2024.short_losses, 1);
    assert_eq!(doc.summary.overall_stats.total_pnl, 691.75);
}

#[test]
fn exit_year_decides_the_bucket() {
    let text = export(&[
        "1,Entry long,L,2021-12-31 22:00,100,1,,,",
        "1,Exit long,X,2022-01-01 02:00,101,1,1,1,",
    ]);
    let doc = convert_str(&text, &english()).unwrap().document;
    assert_eq!(doc.summary.years, vec!["2022"]);
}

#[test]
fn malformed_row_fails_the_file_by_default() {
    let text = export(&[
        "1,Entry long,L,2024-01-01 00:00,100,1,,,",
        "1,Exit long,X,2024-01-02 00:00,105,1,not-a-number,1,",
    ]);
    let err = convert_str(&text, &english()).unwrap_err();
    match err {
        CoreError::MalformedRow { line, fault } => {
            assert_eq!(line, 3);
            assert!(matches!(fault, RowFault::Number { field: "P&L", .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn skip_policy_converts_the_rest() {
    let opts = ConvertOptions {
        row_policy: RowPolicy::Skip,
        ..english()
    };
    let text = export(&[
        "1,Entry long,L,2024-01-01 00:00,100,1,,,",
        "1,Exit long,X,2024-01-02 00:00,105,1,5,5,",
        "2,Entry long,L,bad date,100,1,,,",
        "2,Exit long,X,2024-01-04 00:00,105,1,5,5,",
    ]);
    let conv = convert_str(&text, &opts).unwrap();
    assert_eq!(conv.document.summary.overall_stats.total_trades, 1);
    assert_eq!(conv.diagnostics.len(), 2);
    assert!(matches!(
        conv.diagnostics[0],
        Diagnostic::SkippedRow { line: 4, .. }
    ));
    assert!(matches!(
        conv.diagnostics[1],
        Diagnostic::Unpaired {
            trade_num: 2,
            missing: MissingLeg::Entry
        }
    ));
}

#[test]
fn missing_header_column_fails() {
    let text = "Trade #,Type,Date/Time\n1,Entry long,2024-01-01 00:00\n";
    let err = convert_str(text, &english()).unwrap_err();
    assert!(matches!(err, CoreError::MissingColumn { .. }));
}

#[test]
fn empty_input_is_an_empty_document() {
    let conv = convert_str("", &english()).unwrap();
    assert!(conv.document.yearly_data.is_empty());
    assert!(conv.diagnostics.is_empty());

    let header_only = convert_str(EN_HEADER, &english()).unwrap();
    assert!(header_only.document.yearly_data.is_empty());
}

#[test]
fn converting_twice_is_identical_apart_from_timestamp() {
    let text = export(&[
        "1,Entry long,L,2022-11-01 00:00,100,1,,,",
        "1,Exit long,X,2022-12-01 00:00,130,1,300.123,30,",
        "2,Entry short,S,2023-01-02 00:00,200,1,,,",
        "2,Exit short,X,2023-02-01 00:00,210,1,-100.456,-5,",
        "3,Entry short,S,2023-03-02 00:00,200,1,,,",
    ]);
    let a = analyze(&text, &english()).unwrap();
    let b = analyze(&text, &english()).unwrap();

    assert_eq!(
        serde_json::to_string(&a.yearly).unwrap(),
        serde_json::to_string(&b.yearly).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&a.overall).unwrap(),
        serde_json::to_string(&b.overall).unwrap()
    );
    assert_eq!(a.diagnostics, b.diagnostics);
}

#[test]
fn document_json_shape() {
    let text = export(&[
        "1,Entry long,L,2024-01-01 00:00,100,1,,,",
        "1,Exit long,X,2024-01-02 00:00,105,1,5,5,",
    ]);
    let doc = convert_str(&text, &english()).unwrap().document;
    let json = serde_json::to_value(&doc).unwrap();

    assert!(json["summary"]["years"].is_array());
    assert!(json["summary"]["overallStats"]["totalReturnRate"].is_number());
    assert!(json["summary"]["generatedAt"].is_string());
    let bucket = &json["yearlyData"]["2024"];
    assert_eq!(bucket["year"], 2024);
    assert_eq!(bucket["longTrades"][0]["tradeNum"], 1);
    assert_eq!(bucket["trades"][0]["exitDate"], "2024-01-02 00:00");
    assert!(bucket["shortTrades"].as_array().unwrap().is_empty());
}
