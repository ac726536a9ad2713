//! 地址清理（門牌號での切り詰め）
//!
//! 地址の末尾にある建物名・樓層などを落とし、最後の門牌號までを残す。
//!
//! ## 文法
//! ```text
//! HouseNumber := [ Numeral "巷" ] [ Numeral "弄" ] Numeral [ "之" Numeral ] "號"
//! Numeral     := 0-9 | ０-９ | 〇零一二三四五六七八九十百千 の1文字以上
//! ```
//!
//! 文法は `HOUSE_NUMBER_GRAMMAR` のセグメント列として定義し、
//! 起動時に1度だけ正規表現へ変換する。新しい住所形式は
//! セグメントを追加して対応する。

use regex::Regex;

/// 数字として扱う文字（半角・全角・漢数字）
pub const NUMERAL_CHARS: &str = "0-9０-９〇零一二三四五六七八九十百千";

/// 「之」番地の区切り（58之1號 / 58-1號）
const SUB_NUMBER_SEPARATORS: &str = "之\\-－";

/// 文法の1セグメント: 数字列 + 単位
#[derive(Debug, Clone, Copy)]
pub struct UnitSegment {
    /// キャプチャ名
    pub name: &'static str,
    /// 単位の表記（いずれか）
    pub markers: &'static [&'static str],
    /// 省略可能か
    pub optional: bool,
    /// 「之N」の枝番を許すか
    pub sub_number: bool,
}

/// 巷・弄・號の文法
pub const HOUSE_NUMBER_GRAMMAR: &[UnitSegment] = &[
    UnitSegment { name: "lane", markers: &["巷"], optional: true, sub_number: false },
    UnitSegment { name: "alley", markers: &["弄"], optional: true, sub_number: false },
    UnitSegment { name: "number", markers: &["號", "号"], optional: false, sub_number: true },
];

/// 文法から正規表現パターンを組み立てる
pub fn pattern_from_grammar(grammar: &[UnitSegment]) -> String {
    let numeral = format!("[{}]+", NUMERAL_CHARS);

    grammar
        .iter()
        .map(|segment| {
            let value = if segment.sub_number {
                format!("{n}(?:[{sep}]{n})?", n = numeral, sep = SUB_NUMBER_SEPARATORS)
            } else {
                numeral.clone()
            };
            let markers = segment
                .markers
                .iter()
                .map(|m| regex::escape(m))
                .collect::<Vec<_>>()
                .join("|");
            let body = format!("(?P<{}>{})(?:{})", segment.name, value, markers);
            if segment.optional {
                format!("(?:{})?", body)
            } else {
                body
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref HOUSE_NUMBER_RE: Regex =
        Regex::new(&pattern_from_grammar(HOUSE_NUMBER_GRAMMAR)).unwrap();
}

/// 地址中で見つかった門牌號
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseNumber {
    /// 巷の数字
    pub lane: Option<String>,
    /// 弄の数字
    pub alley: Option<String>,
    /// 號の数字（枝番を含む）
    pub number: String,
    /// マッチ開始位置（バイト）
    pub start: usize,
    /// マッチ終了位置（バイト、號の直後）
    pub end: usize,
}

/// 最も右にある門牌號を解析する
pub fn parse_house_number(address: &str) -> Option<HouseNumber> {
    HOUSE_NUMBER_RE
        .captures_iter(address)
        .last()
        .and_then(|caps| {
            let whole = caps.get(0)?;
            Some(HouseNumber {
                lane: caps.name("lane").map(|m| m.as_str().to_string()),
                alley: caps.name("alley").map(|m| m.as_str().to_string()),
                number: caps.name("number")?.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
            })
        })
}

/// 地址を最後の門牌號までに切り詰める
///
/// 門牌號が見つからない場合は入力をそのまま返す。
///
/// # Examples
/// ```
/// use site_router_common::clean_address;
///
/// assert_eq!(
///     clean_address("台中市西屯區中清路三段225巷12弄58號5樓之2"),
///     "台中市西屯區中清路三段225巷12弄58號"
/// );
/// assert_eq!(clean_address("彰化縣員林市"), "彰化縣員林市");
/// ```
pub fn clean_address(address: &str) -> String {
    match parse_house_number(address) {
        Some(house) => address[..house.end].to_string(),
        None => address.to_string(),
    }
}
