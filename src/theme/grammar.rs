//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::layout::{Length, OffsetOp};
use crate::theme::ast::*;
use crate::theme::lexer::Token;

/// Top-level entry in a theme file
#[derive(Debug, Clone)]
enum Item {
    Property(Property),
    Component(Component),
}

/// Parse a theme file
pub fn parse(input: &str) -> Result<Theme, Vec<crate::ParseError>> {
    let len = input.len();

    let token_iter = crate::theme::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    theme_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn split_items(items: Vec<Item>) -> (Vec<Property>, Vec<Component>) {
    let mut properties = Vec::new();
    let mut components = Vec::new();
    for item in items {
        match item {
            Item::Property(p) => properties.push(p),
            Item::Component(c) => components.push(c),
        }
    }
    (properties, components)
}

fn length_parser<'a, I>() -> impl Parser<'a, I, Length, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let number = select! {
        Token::Number(n) => n,
    };

    let signed = just(Token::Minus)
        .or_not()
        .then(number)
        .map(|(minus, n)| if minus.is_some() { -n } else { n });

    let offset_op = choice((
        just(Token::Plus).to(OffsetOp::Add),
        just(Token::Minus).to(OffsetOp::Sub),
    ));

    let percentage = just(Token::Percent).ignore_then(offset_op.then(number).or_not());

    signed
        .then(percentage.or_not())
        .map(|(value, percent)| match percent {
            None => Length::Absolute(value),
            Some(None) => Length::Relative(value),
            Some(Some((op, offset))) => Length::combined(value, op, offset),
        })
        .labelled("length")
}

fn theme_parser<'a, I>() -> impl Parser<'a, I, Theme, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let name = select! {
        Token::Ident(s) => s,
    }
    .labelled("name");

    let value = choice((
        select! {
            Token::String(s) => PropertyValue::String(s),
            Token::Ident(s) => PropertyValue::String(s),
            Token::True => PropertyValue::Bool(true),
            Token::False => PropertyValue::Bool(false),
        },
        length_parser().map(PropertyValue::Length),
    ))
    .labelled("value");

    let separator = choice((just(Token::Colon), just(Token::Equals)));

    let property = name
        .clone()
        .then_ignore(separator)
        .then(value)
        .map_with(|(name, value), e| Property::new(name, value, span_range(&e.span())))
        .boxed();

    let component = recursive(|component| {
        let item = choice((
            property.clone().map(Item::Property),
            component.map(Item::Component),
        ));

        just(Token::Plus)
            .ignore_then(name)
            .then(
                item.repeated()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::BraceOpen), just(Token::BraceClose)),
            )
            .map_with(|(kind, items), e| {
                let (properties, children) = split_items(items);
                Component {
                    kind,
                    properties,
                    children,
                    span: span_range(&e.span()),
                }
            })
    })
    .boxed();

    choice((
        property.map(Item::Property),
        component.map(Item::Component),
    ))
    .repeated()
    .collect::<Vec<_>>()
    .then_ignore(end())
    .map(|items| {
        let (properties, components) = split_items(items);
        Theme {
            properties,
            components,
        }
    })
}
