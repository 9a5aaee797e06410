use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use crate::Result;
use crate::error::Error;
use crate::types::{DataType, Field};

#[derive(Parser)]
#[grammar = "parser/types.pest"]
pub struct TypeParser;

/// Parses `struct<id:bigint, tags:array<string>>` style type text.
pub fn parse_data_type(sql: &str) -> Result<DataType> {
    let pair = parse_single(Rule::singleDataType, sql)?;
    parse_data_type_pair(first_inner(pair)?)
}

fn parse_single(rule: Rule, sql: &str) -> Result<Pair<'_, Rule>> {
    TypeParser::parse(rule, sql)
        .map_err(|e| Error::Parse(e.to_string()))?
        .next()
        .ok_or_else(|| Error::Parse(format!("empty input: '{}'", sql)))
}

fn first_inner(pair: Pair<Rule>) -> Result<Pair<Rule>> {
    let rule = pair.as_rule();
    pair.into_inner().next().ok_or_else(|| Error::Parse(format!("{:?} has no content", rule)))
}

fn parse_data_type_pair(pair: Pair<Rule>) -> Result<DataType> {
    match pair.as_rule() {
        Rule::dataType => parse_data_type_pair(first_inner(pair)?),
        Rule::arrayDataType => parse_data_type_pair(first_inner(pair)?).map(DataType::array_type),
        Rule::structDataType => {
            let data_type = DataType::struct_type(pair.into_inner().map(parse_col_type).collect::<Result<Vec<_>>>()?);
            match data_type.duplicate_field_name() {
                Some(name) => Err(Error::Parse(format!("duplicate field name '{}' in {}", name, data_type))),
                None => Ok(data_type),
            }
        },
        Rule::primitiveDataType => parse_primitive_data_type(first_inner(pair)?),
        r => Err(Error::Parse(format!("expected a data type but found {:?}", r))),
    }
}

fn parse_col_type(pair: Pair<Rule>) -> Result<Field> {
    let mut pairs = pair.into_inner();
    let name = match pairs.next() {
        Some(p) => parse_identifier(p)?,
        None => return Err(Error::Parse("column without a name".to_string())),
    };
    let data_type = match pairs.next() {
        Some(p) => parse_data_type_pair(p)?,
        None => return Err(Error::Parse(format!("column {} without a type", name))),
    };
    Ok(Field::new(name, data_type))
}

fn parse_identifier(pair: Pair<Rule>) -> Result<String> {
    let inner = first_inner(pair)?;
    match inner.as_rule() {
        Rule::unquotedIdentifier => Ok(inner.as_str().to_string()),
        Rule::quotedIdentifier => Ok(first_inner(inner).map(|name| name.as_str().replace("``", "`")).unwrap_or_default()),
        r => Err(Error::Parse(format!("expected an identifier but found {:?}", r))),
    }
}

fn parse_primitive_data_type(pair: Pair<Rule>) -> Result<DataType> {
    let name = parse_identifier(pair)?;
    match name.to_ascii_lowercase().as_str() {
        "boolean" | "bool" => Ok(DataType::Boolean),
        "int" | "integer" => Ok(DataType::Int),
        "bigint" | "long" => Ok(DataType::Long),
        "float" | "real" => Ok(DataType::Float),
        "double" => Ok(DataType::Double),
        "string" | "varchar" | "text" => Ok(DataType::String),
        "date" => Ok(DataType::Date),
        "timestamp" | "datetime" => Ok(DataType::Timestamp),
        "binary" | "bytes" => Ok(DataType::Binary),
        "null" | "void" => Ok(DataType::Null),
        _ => Err(Error::Parse(format!("unsupported data type: {}", name))),
    }
}
