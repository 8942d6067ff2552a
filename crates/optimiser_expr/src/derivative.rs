//! Symbolic differentiation.

use crate::ast::{Function, Node};

/// d/dx of `node`, simplified with the folding constructors.
pub(crate) fn differentiate(node: &Node) -> Node {
    match node {
        Node::Constant(_) => Node::Constant(0.0),
        Node::Variable => Node::Constant(1.0),
        Node::Negate(a) => Node::negate(differentiate(a)),
        Node::Add(a, b) => Node::sum(differentiate(a), differentiate(b)),
        Node::Sub(a, b) => Node::difference(differentiate(a), differentiate(b)),
        Node::Mul(a, b) => Node::sum(
            Node::product(differentiate(a), (**b).clone()),
            Node::product((**a).clone(), differentiate(b)),
        ),
        Node::Div(a, b) => {
            if b.is_constant() {
                return Node::quotient(differentiate(a), (**b).clone());
            }
            // (a'b - ab') / b²
            let numerator = Node::difference(
                Node::product(differentiate(a), (**b).clone()),
                Node::product((**a).clone(), differentiate(b)),
            );
            Node::quotient(numerator, Node::power((**b).clone(), Node::Constant(2.0)))
        }
        Node::Pow(a, b) => power(a, b),
        Node::Call(function, a) => chain(*function, a),
    }
}

fn power(base: &Node, exponent: &Node) -> Node {
    let du = differentiate(base);

    if exponent.is_constant() {
        // n u**(n-1) u'
        let reduced = Node::difference(exponent.clone(), Node::Constant(1.0));
        return Node::product(
            Node::product(exponent.clone(), Node::power(base.clone(), reduced)),
            du,
        );
    }

    let dv = differentiate(exponent);
    let whole = Node::power(base.clone(), exponent.clone());
    let ln_u = Node::call(Function::Ln, base.clone());

    if base.is_constant() {
        // u**v ln(u) v'
        return Node::product(Node::product(whole, ln_u), dv);
    }

    // u**v (v' ln(u) + v u'/u)
    Node::product(
        whole,
        Node::sum(
            Node::product(dv, ln_u),
            Node::quotient(Node::product(exponent.clone(), du), base.clone()),
        ),
    )
}

fn chain(function: Function, u: &Node) -> Node {
    let du = differentiate(u);
    if du == Node::Constant(0.0) {
        return du;
    }

    let outer = match function {
        Function::Sin => Node::call(Function::Cos, u.clone()),
        Function::Cos => Node::negate(Node::call(Function::Sin, u.clone())),
        Function::Tan => Node::quotient(
            Node::Constant(1.0),
            Node::power(Node::call(Function::Cos, u.clone()), Node::Constant(2.0)),
        ),
        Function::Exp => Node::call(Function::Exp, u.clone()),
        Function::Ln => Node::quotient(Node::Constant(1.0), u.clone()),
        Function::Sqrt => Node::quotient(
            Node::Constant(1.0),
            Node::product(Node::Constant(2.0), Node::call(Function::Sqrt, u.clone())),
        ),
        Function::Abs => Node::quotient(u.clone(), Node::call(Function::Abs, u.clone())),
    };

    match outer {
        // 1/g * u' reads better as u'/g
        Node::Div(numerator, denominator) if *numerator == Node::Constant(1.0) => {
            Node::quotient(du, *denominator)
        }
        outer => Node::product(du, outer),
    }
}
