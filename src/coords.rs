// Coordinate parsing and the block handler.
// A line like "(12, 34) (56, 78)" or "12 34 56 78" becomes two points,
// each coordinate divided by the downscale factor.

use crate::classify::Block;
use crate::types::{Downscale, Point};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected 4 coordinates, found {0}")]
    TokenCount(usize),

    #[error("not an integer: {0:?}")]
    NotAnInteger(String),
}

/// Parse one raw coordinate line into two scaled points.
pub fn parse_coordinates(line: &str, downscale: Downscale) -> Result<[Point; 2], ParseError> {
    let cleaned: String = line
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ','))
        .collect();

    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let &[x1, y1, x2, y2] = tokens.as_slice() else {
        return Err(ParseError::TokenCount(tokens.len()));
    };

    let scaled = |tok: &str| {
        tok.parse::<i32>()
            .map(|v| downscale.apply(v))
            .map_err(|_| ParseError::NotAnInteger(tok.to_owned()))
    };

    Ok([
        Point::new(scaled(x1)?, scaled(y1)?),
        Point::new(scaled(x2)?, scaled(y2)?),
    ])
}

/// All points of a block, in line order. Malformed lines contribute nothing.
pub fn points_from_block(block: &Block, downscale: Downscale) -> Vec<Point> {
    let mut points = Vec::with_capacity(block.lines.len() * 2);
    for line in &block.lines {
        match parse_coordinates(line, downscale) {
            Ok(pair) => points.extend(pair),
            Err(e) => log::debug!("skipping {} line {:?}: {}", block.category, line, e),
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn d(n: i32) -> Downscale {
        Downscale::new(n).unwrap()
    }

    #[test]
    fn parses_parenthesized_pairs() {
        let pts = parse_coordinates("(40,80) (120,160)", d(4)).unwrap();
        assert_eq!(pts, [Point::new(10, 20), Point::new(30, 40)]);
    }

    #[test]
    fn parses_bare_and_spaced_forms() {
        assert_eq!(
            parse_coordinates("12 34 56 78", d(1)).unwrap(),
            [Point::new(12, 34), Point::new(56, 78)]
        );
        assert_eq!(
            parse_coordinates("( 12 , 34 )\t( 56 , 78 )", d(2)).unwrap(),
            [Point::new(6, 17), Point::new(28, 39)]
        );
    }

    #[test]
    fn division_floors_positive_values() {
        for raw in [0, 1, 3, 4, 5, 199, 1079, 1919] {
            let line = format!("{raw} {raw} {raw} {raw}");
            let pts = parse_coordinates(&line, d(4)).unwrap();
            assert_eq!(pts[0], Point::new(raw / 4, raw / 4));
            assert_eq!(pts[1], pts[0]);
        }
    }

    #[test]
    fn wrong_token_count_fails() {
        assert_eq!(parse_coordinates("(1,2)", d(4)), Err(ParseError::TokenCount(2)));
        assert_eq!(parse_coordinates("1 2 3 4 5", d(4)), Err(ParseError::TokenCount(5)));
        assert_eq!(parse_coordinates("", d(4)), Err(ParseError::TokenCount(0)));
    }

    #[test]
    fn non_integer_token_fails() {
        assert_eq!(
            parse_coordinates("(1,2) (3,4.5)", d(4)),
            Err(ParseError::NotAnInteger("4.5".into()))
        );
        assert_eq!(
            parse_coordinates("a b c d", d(4)),
            Err(ParseError::NotAnInteger("a".into()))
        );
    }

    #[test]
    fn block_concatenates_good_lines() {
        let block = Block {
            category: Category::Corners,
            lines: [
                "(40,80) (120,160)".into(),
                "(0,0) (4,4)".into(),
                "(200,200) (199,199)".into(),
            ],
        };
        assert_eq!(
            points_from_block(&block, d(4)),
            vec![
                Point::new(10, 20),
                Point::new(30, 40),
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(50, 50),
                Point::new(49, 49),
            ]
        );
    }

    #[test]
    fn block_skips_malformed_lines() {
        let block = Block {
            category: Category::Hints,
            lines: ["garbage".into(), "(8,8) (16,16)".into(), "1 2 3".into()],
        };
        assert_eq!(
            points_from_block(&block, d(4)),
            vec![Point::new(2, 2), Point::new(4, 4)]
        );
    }
}
