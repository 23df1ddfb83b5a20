use crate::ast::{Node, Sexpr, Span, Spanned};
use crate::values::Value;
use num_bigint::BigInt;
use num_rational::BigRational;
use pest::iterators::Pair;
use pest::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct SexprParser;

/// Parse a whole program into the sequence of top-level nodes the
/// evaluator consumes.
pub fn parse(input: &str) -> Result<Vec<Node>, pest::error::Error<Rule>> {
    let pairs = SexprParser::parse(Rule::program, input)?;
    Ok(pairs
        .flat_map(|pair| pair.into_inner())
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(build_node)
        .collect())
}

fn span_of(pair: &Pair<Rule>) -> Span {
    let span = pair.as_span();
    let (line, col) = span.start_pos().line_col();
    Span::new(span.start(), span.end(), line, col)
}

fn build_node(pair: Pair<Rule>) -> Node {
    let span = span_of(&pair);
    let node = match pair.as_rule() {
        Rule::list => Sexpr::List(pair.into_inner().map(build_node).collect()),
        Rule::number => Sexpr::Literal(Value::Number(parse_number(pair.as_str()))),
        Rule::string => {
            let raw = pair
                .into_inner()
                .next()
                .map(|inner| inner.as_str())
                .unwrap_or("");
            Sexpr::Literal(Value::string(unescape(raw)))
        }
        Rule::symbol => Sexpr::Symbol(pair.as_str().to_string()),
        rule => unreachable!("unexpected rule: {:?}", rule),
    };
    Spanned::new(node, span)
}

/// Convert a decimal literal to an exact reduced rational: "1.5" is 3/2,
/// never a floating-point approximation.
fn parse_number(text: &str) -> BigRational {
    let (digits, scale) = match text.split_once('.') {
        Some((whole, frac)) => (format!("{}{}", whole, frac), frac.len()),
        None => (text.to_string(), 0),
    };
    let numer = digits
        .parse::<BigInt>()
        .unwrap_or_else(|_| unreachable!("the grammar only admits decimal digits: {}", text));
    let denom = num_traits::pow(BigInt::from(10), scale);
    BigRational::new(numer, denom)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
