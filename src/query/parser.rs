//! A `nom`-based parser for the path-expression subset emitted by the
//! resolver and its filter builder.

use super::ast::{Axis, BinaryOperator, Expression, Function, LocationPath, NodeTest, Step};
use super::errors::QueryError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, opt},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded},
};

/// Parses a complete location path, validating function arity so that
/// evaluation never has to fail.
pub(crate) fn parse_path(input: &str) -> Result<LocationPath, QueryError> {
    match location_path(input.trim()) {
        Ok(("", path)) => {
            validate_path(&path)?;
            Ok(path)
        }
        Ok((remainder, _)) => Err(QueryError::Trailing {
            expression: input.to_owned(),
            remainder: remainder.to_owned(),
        }),
        Err(error) => Err(QueryError::Syntax {
            expression: input.to_owned(),
            message: error.to_string(),
        }),
    }
}

fn validate_path(path: &LocationPath) -> Result<(), QueryError> {
    path.steps
        .iter()
        .flat_map(|step| &step.predicates)
        .try_for_each(validate_expression)
}

fn validate_expression(expression: &Expression) -> Result<(), QueryError> {
    match expression {
        Expression::Function { function, args } => {
            let (min, max) = function.arity();
            if args.len() < min || args.len() > max {
                return Err(QueryError::Arity {
                    function: function.name(),
                    given: args.len(),
                });
            }
            args.iter().try_for_each(validate_expression)
        }
        Expression::Binary { left, right, .. } => {
            validate_expression(left)?;
            validate_expression(right)
        }
        Expression::Path(path) => validate_path(path),
        Expression::Literal(_) => Ok(()),
    }
}

// --- Combinators & helpers ---

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

/// Left-associative chain of `operand (operator operand)*`.
fn binary<'a>(
    operand: fn(&'a str) -> IResult<&'a str, Expression>,
    operator: fn(&'a str) -> IResult<&'a str, BinaryOperator>,
    input: &'a str,
) -> IResult<&'a str, Expression> {
    let (input, mut left) = operand(input)?;
    let (input, rest) = many0(pair(ws(operator), operand)).parse(input)?;

    for (op, right) in rest {
        left = Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        };
    }
    Ok((input, left))
}

// --- Location paths ---

fn location_path(input: &str) -> IResult<&str, LocationPath> {
    alt((absolute_path, relative_path)).parse(input)
}

fn absolute_path(input: &str) -> IResult<&str, LocationPath> {
    let (input, descend) = alt((tag("//"), tag("/"))).parse(input)?;
    let (input, rest) = opt(relative_path).parse(input)?;

    let mut steps = Vec::new();
    if descend == "//" {
        steps.push(Step::descendant_or_self());
    }
    if let Some(rest) = rest {
        steps.extend(rest.steps);
    }
    Ok((input, LocationPath {
        absolute: true,
        steps,
    }))
}

fn relative_path(input: &str) -> IResult<&str, LocationPath> {
    let (input, first) = step(input)?;
    let (input, rest) = many0(pair(alt((tag("//"), tag("/"))), step)).parse(input)?;

    let mut steps = vec![first];
    for (separator, next) in rest {
        if separator == "//" {
            steps.push(Step::descendant_or_self());
        }
        steps.push(next);
    }
    Ok((input, LocationPath {
        absolute: false,
        steps,
    }))
}

fn step(input: &str) -> IResult<&str, Step> {
    alt((
        map(tag(".."), |_| Step::new(Axis::Parent, NodeTest::AnyNode)),
        map(char('.'), |_| Step::new(Axis::SelfAxis, NodeTest::AnyNode)),
        attribute_step,
        element_step,
    ))
    .parse(input)
}

fn attribute_step(input: &str) -> IResult<&str, Step> {
    map(preceded(char('@'), qualified_name), |(prefix, local)| {
        Step::new(Axis::Attribute, NodeTest::Named { prefix, local })
    })
    .parse(input)
}

fn element_step(input: &str) -> IResult<&str, Step> {
    let (input, test) = node_test(input)?;
    let (input, predicates) = many0(predicate).parse(input)?;
    Ok((input, Step {
        axis: Axis::Child,
        test,
        predicates,
    }))
}

fn node_test(input: &str) -> IResult<&str, NodeTest> {
    alt((
        map(tag("text()"), |_| NodeTest::Text),
        map(tag("node()"), |_| NodeTest::AnyNode),
        map(char('*'), |_| NodeTest::Wildcard),
        map(qualified_name, |(prefix, local)| NodeTest::Named {
            prefix,
            local,
        }),
    ))
    .parse(input)
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_').parse(input)
}

fn qualified_name(input: &str) -> IResult<&str, (Option<String>, String)> {
    let (input, first) = name(input)?;
    let (input, second) = opt(preceded(char(':'), name)).parse(input)?;

    Ok(match second {
        Some(local) => (input, (Some(first.to_owned()), local.to_owned())),
        None => (input, (None, first.to_owned())),
    })
}

// --- Predicate expressions (in order of precedence) ---

fn predicate(input: &str) -> IResult<&str, Expression> {
    delimited(char('['), ws(expression), char(']')).parse(input)
}

fn expression(input: &str) -> IResult<&str, Expression> {
    or_expression(input)
}

fn or_expression(input: &str) -> IResult<&str, Expression> {
    binary(and_expression, or_operator, input)
}

fn and_expression(input: &str) -> IResult<&str, Expression> {
    binary(equality_expression, and_operator, input)
}

fn or_operator(input: &str) -> IResult<&str, BinaryOperator> {
    map(tag("or"), |_| BinaryOperator::Or).parse(input)
}

fn and_operator(input: &str) -> IResult<&str, BinaryOperator> {
    map(tag("and"), |_| BinaryOperator::And).parse(input)
}

fn equality_expression(input: &str) -> IResult<&str, Expression> {
    let (input, left) = value_expression(input)?;
    let (input, right) = opt(preceded(ws(char('=')), value_expression)).parse(input)?;

    Ok(match right {
        Some(right) => (input, Expression::Binary {
            left: Box::new(left),
            op: BinaryOperator::Equals,
            right: Box::new(right),
        }),
        None => (input, left),
    })
}

fn value_expression(input: &str) -> IResult<&str, Expression> {
    // Function calls are tried before location paths; a name such as
    // `contains` would otherwise parse as a child step before the argument
    // list is ever seen.
    alt((
        map(string_literal, Expression::Literal),
        function_call,
        map(location_path, Expression::Path),
        delimited(ws(char('(')), expression, ws(char(')'))),
    ))
    .parse(input)
}

fn function_call(input: &str) -> IResult<&str, Expression> {
    let (rest, function) = function_name(input)?;
    let (rest, args) = delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), expression),
        ws(char(')')),
    )
    .parse(rest)?;

    Ok((rest, Expression::Function { function, args }))
}

fn function_name(input: &str) -> IResult<&str, Function> {
    let (rest, candidate) = name(input)?;
    match Function::by_name(candidate) {
        Some(function) => Ok((rest, function)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        ))),
    }
}

fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        alt((
            delimited(char('\''), take_while(|c| c != '\''), char('\'')),
            delimited(char('"'), take_while(|c| c != '"'), char('"')),
        )),
        |literal: &str| literal.to_owned(),
    )
    .parse(input)
}
