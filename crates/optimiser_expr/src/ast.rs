//! Expression tree.
//!
//! The parser builds nodes as written. The simplifying constructors
//! ([`Node::sum`], [`Node::product`], ...) fold constants and drop
//! identities; symbolic differentiation uses them to keep results small.

use std::fmt;

/// Built-in functions of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Exponential
    Exp,
    /// Natural logarithm (`log` and `ln`)
    Ln,
    /// Square root
    Sqrt,
    /// Absolute value
    Abs,
}

impl Function {
    /// Look up a function by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Function::Sin),
            "cos" => Some(Function::Cos),
            "tan" => Some(Function::Tan),
            "exp" => Some(Function::Exp),
            "log" | "ln" => Some(Function::Ln),
            "sqrt" => Some(Function::Sqrt),
            "abs" => Some(Function::Abs),
            _ => None,
        }
    }

    /// Canonical source name.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Exp => "exp",
            Function::Ln => "log",
            Function::Sqrt => "sqrt",
            Function::Abs => "abs",
        }
    }
}

/// Node of an expression in one variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric constant
    Constant(f64),
    /// The expression's variable
    Variable,
    /// Unary minus
    Negate(Box<Node>),
    /// `a + b`
    Add(Box<Node>, Box<Node>),
    /// `a - b`
    Sub(Box<Node>, Box<Node>),
    /// `a * b`
    Mul(Box<Node>, Box<Node>),
    /// `a / b`
    Div(Box<Node>, Box<Node>),
    /// `a ** b`
    Pow(Box<Node>, Box<Node>),
    /// `f(a)`
    Call(Function, Box<Node>),
}

impl Node {
    /// True when the subtree does not reference the variable.
    pub fn is_constant(&self) -> bool {
        match self {
            Node::Constant(_) => true,
            Node::Variable => false,
            Node::Negate(a) | Node::Call(_, a) => a.is_constant(),
            Node::Add(a, b)
            | Node::Sub(a, b)
            | Node::Mul(a, b)
            | Node::Div(a, b)
            | Node::Pow(a, b) => a.is_constant() && b.is_constant(),
        }
    }

    fn as_constant(&self) -> Option<f64> {
        match self {
            Node::Constant(c) => Some(*c),
            _ => None,
        }
    }

    /// The node `n` with `self == -n`, when `self` reads as a negation.
    fn negated_form(&self) -> Option<Node> {
        match self {
            Node::Negate(inner) => Some((**inner).clone()),
            Node::Constant(c) if *c < 0.0 => Some(Node::Constant(-c)),
            Node::Mul(a, b) => a
                .negated_form()
                .map(|a| Node::Mul(Box::new(a), b.clone())),
            Node::Div(a, b) => a
                .negated_form()
                .map(|a| Node::Div(Box::new(a), b.clone())),
            _ => None,
        }
    }

    /// `-a`, folding constants and double negation.
    pub fn negate(a: Node) -> Node {
        match a {
            Node::Constant(c) => Node::Constant(-c),
            Node::Negate(inner) => *inner,
            other => Node::Negate(Box::new(other)),
        }
    }

    /// `a + b`, dropping zero terms.
    pub fn sum(a: Node, b: Node) -> Node {
        match (a.as_constant(), b.as_constant()) {
            (Some(x), Some(y)) => Node::Constant(x + y),
            (Some(x), _) if x == 0.0 => b,
            (_, Some(y)) if y == 0.0 => a,
            _ => match b.negated_form() {
                Some(positive) => Node::difference(a, positive),
                None => Node::Add(Box::new(a), Box::new(b)),
            },
        }
    }

    /// `a - b`, dropping zero terms.
    pub fn difference(a: Node, b: Node) -> Node {
        match (a.as_constant(), b.as_constant()) {
            (Some(x), Some(y)) => Node::Constant(x - y),
            (Some(x), _) if x == 0.0 => Node::negate(b),
            (_, Some(y)) if y == 0.0 => a,
            _ => match b.negated_form() {
                Some(positive) => Node::sum(a, positive),
                None => Node::Sub(Box::new(a), Box::new(b)),
            },
        }
    }

    /// `a * b`, folding zero and unit factors.
    pub fn product(a: Node, b: Node) -> Node {
        match (a.as_constant(), b.as_constant()) {
            (Some(x), Some(y)) => Node::Constant(x * y),
            (Some(x), _) if x == 0.0 => Node::Constant(0.0),
            (_, Some(y)) if y == 0.0 => Node::Constant(0.0),
            (Some(x), _) if x == 1.0 => b,
            (_, Some(y)) if y == 1.0 => a,
            (Some(x), _) if x == -1.0 => Node::negate(b),
            (_, Some(y)) if y == -1.0 => Node::negate(a),
            // Keep constants on the left: c * x
            (None, Some(_)) => Node::product(b, a),
            // c1 * (c2 * r) => (c1 c2) * r
            (Some(x), None) => match b {
                Node::Mul(l, r) => match l.as_constant() {
                    Some(y) => Node::product(Node::Constant(x * y), *r),
                    None => Node::Mul(Box::new(a), Box::new(Node::Mul(l, r))),
                },
                b => Node::Mul(Box::new(a), Box::new(b)),
            },
            _ => Node::Mul(Box::new(a), Box::new(b)),
        }
    }

    /// `a / b`, folding a unit denominator and a zero numerator.
    ///
    /// Constant division by zero is left unfolded so evaluation reports it.
    pub fn quotient(a: Node, b: Node) -> Node {
        match (a.as_constant(), b.as_constant()) {
            (Some(x), Some(y)) if y != 0.0 => Node::Constant(x / y),
            (Some(x), _) if x == 0.0 => Node::Constant(0.0),
            (_, Some(y)) if y == 1.0 => a,
            _ => Node::Div(Box::new(a), Box::new(b)),
        }
    }

    /// `a ** b`, folding unit and zero exponents.
    pub fn power(a: Node, b: Node) -> Node {
        match b.as_constant() {
            Some(y) if y == 1.0 => a,
            Some(y) if y == 0.0 => Node::Constant(1.0),
            _ => Node::Pow(Box::new(a), Box::new(b)),
        }
    }

    /// `f(a)`.
    pub fn call(function: Function, a: Node) -> Node {
        Node::Call(function, Box::new(a))
    }

    /// Binding strength used by `Display` to place parentheses.
    fn precedence(&self) -> u8 {
        match self {
            Node::Add(..) | Node::Sub(..) => 1,
            Node::Mul(..) | Node::Div(..) => 2,
            Node::Negate(_) => 3,
            Node::Constant(c) if c.is_sign_negative() => 3,
            Node::Pow(..) => 4,
            Node::Constant(_) | Node::Variable | Node::Call(..) => 5,
        }
    }
}

/// Displays `node` with parentheses only where the grammar needs them.
pub(crate) struct Rendered<'a> {
    pub node: &'a Node,
    pub variable: &'a str,
}

impl Rendered<'_> {
    fn child<'b>(&'b self, node: &'b Node) -> Rendered<'b> {
        Rendered {
            node,
            variable: self.variable,
        }
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>, node: &Node, wrap: bool) -> fmt::Result {
        if wrap {
            write!(f, "({})", self.child(node))
        } else {
            write!(f, "{}", self.child(node))
        }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Node::Constant(c) => write!(f, "{}", c),
            Node::Variable => f.write_str(self.variable),
            Node::Negate(a) => {
                f.write_str("-")?;
                self.write_operand(f, a, a.precedence() < 3)
            }
            Node::Add(a, b) => {
                self.write_operand(f, a, false)?;
                f.write_str(" + ")?;
                self.write_operand(f, b, false)
            }
            Node::Sub(a, b) => {
                self.write_operand(f, a, false)?;
                f.write_str(" - ")?;
                self.write_operand(f, b, b.precedence() <= 1)
            }
            Node::Mul(a, b) => {
                self.write_operand(f, a, a.precedence() < 2)?;
                f.write_str("*")?;
                self.write_operand(f, b, b.precedence() < 3)
            }
            Node::Div(a, b) => {
                self.write_operand(f, a, a.precedence() < 2)?;
                f.write_str("/")?;
                self.write_operand(f, b, b.precedence() <= 3)
            }
            Node::Pow(a, b) => {
                self.write_operand(f, a, a.precedence() <= 4)?;
                f.write_str("**")?;
                self.write_operand(f, b, b.precedence() < 4)
            }
            Node::Call(function, a) => {
                write!(f, "{}(", function.name())?;
                self.write_operand(f, a, false)?;
                f.write_str(")")
            }
        }
    }
}
