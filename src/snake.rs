use crate::Cell;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> Cell {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left)
        )
    }
}

/// The snake body: occupied cells in order, head at index 0.
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    pub fn new(layout: &[Cell]) -> Self {
        assert!(!layout.is_empty());
        Snake { body: layout.to_vec() }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether `cell` collides with a body segment. The current head is
    /// excluded: moving into the cell the head is leaving is legal.
    pub fn hits_body(&self, cell: Cell) -> bool {
        self.body[1..].contains(&cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Prepend the new head; drop the tail unless growing.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_kept_head_first() {
        let snake = Snake::new(&[(8, 12), (7, 12), (6, 12)]);
        assert_eq!(snake.head(), (8, 12));
        assert_eq!(snake.body(), &[(8, 12), (7, 12), (6, 12)]);
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::new(&[(8, 12), (7, 12), (6, 12)]);
        snake.advance((9, 12), false);
        assert_eq!(snake.body(), &[(9, 12), (8, 12), (7, 12)]);
    }

    #[test]
    fn advance_with_growth_keeps_tail() {
        let mut snake = Snake::new(&[(8, 12), (7, 12), (6, 12)]);
        snake.advance((9, 12), true);
        assert_eq!(snake.body(), &[(9, 12), (8, 12), (7, 12), (6, 12)]);
    }

    #[test]
    fn head_cell_is_not_a_body_collision() {
        let snake = Snake::new(&[(3, 3), (2, 3), (1, 3)]);
        assert!(!snake.hits_body((3, 3)));
        assert!(snake.hits_body((2, 3)));
        assert!(snake.hits_body((1, 3)));
    }

    #[test]
    fn opposites() {
        assert!(Up.is_opposite(Down));
        assert!(Left.is_opposite(Right));
        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Right));
    }
}
