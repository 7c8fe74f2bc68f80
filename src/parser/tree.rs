// Concrete parse tree produced by the parser

use super::token::Token;

/// Grammar productions that name internal nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Program,
    Declaration,
    VariableDeclaration,
    ArrayDeclaration,
    FunctionDeclaration,
    ParameterList,
    DataType,
    ArgumentList,
    Block,
    BlockItemList,
    BlockItem,
    Statement,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    ElseClause,
    WhileStatement,
    ForStatement,
    InputStatement,
    OutputStatement,
    Assignment,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Exponent,
    UnaryExp,
    Factor,
    Const,
}

impl Production {
    pub fn name(self) -> &'static str {
        match self {
            Production::Program => "Program",
            Production::Declaration => "Declaration",
            Production::VariableDeclaration => "Variable_Declaration",
            Production::ArrayDeclaration => "Array_Declaration",
            Production::FunctionDeclaration => "Function_Declaration",
            Production::ParameterList => "Parameter_List",
            Production::DataType => "Data_Type",
            Production::ArgumentList => "Argument_List",
            Production::Block => "Block",
            Production::BlockItemList => "Block_Item_List",
            Production::BlockItem => "Block_Item",
            Production::Statement => "Statement",
            Production::ExpressionStatement => "Expression_Statement",
            Production::ReturnStatement => "Return_Statement",
            Production::IfStatement => "If_Statement",
            Production::ElseClause => "Else_Clause",
            Production::WhileStatement => "While_Statement",
            Production::ForStatement => "For_Statement",
            Production::InputStatement => "Input_Statement",
            Production::OutputStatement => "Output_Statement",
            Production::Assignment => "Assignment",
            Production::LogicalOr => "Logical_Or",
            Production::LogicalAnd => "Logical_And",
            Production::Equality => "Equality",
            Production::Relational => "Relational",
            Production::Additive => "Additive",
            Production::Multiplicative => "Multiplicative",
            Production::Exponent => "Exponent",
            Production::UnaryExp => "Unary_Exp",
            Production::Factor => "Factor",
            Production::Const => "Const",
        }
    }
}

/// A parse tree node: an internal node named by its production, or a leaf
/// holding exactly one terminal token.
///
/// Children are exclusively owned by their parent and never change once the
/// node has been attached.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseTreeNode {
    Branch {
        production: Production,
        children: Vec<ParseTreeNode>,
    },
    Leaf {
        label: &'static str,
        token: Token,
    },
}

impl ParseTreeNode {
    pub fn branch(production: Production, children: Vec<ParseTreeNode>) -> Self {
        ParseTreeNode::Branch {
            production,
            children,
        }
    }

    /// Leaf labelled with the token kind's name
    pub fn terminal(token: Token) -> Self {
        ParseTreeNode::Leaf {
            label: token.kind.name(),
            token,
        }
    }

    pub fn leaf(label: &'static str, token: Token) -> Self {
        ParseTreeNode::Leaf { label, token }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParseTreeNode::Branch { production, .. } => production.name(),
            ParseTreeNode::Leaf { label, .. } => label,
        }
    }

    pub fn production(&self) -> Option<Production> {
        match self {
            ParseTreeNode::Branch { production, .. } => Some(*production),
            ParseTreeNode::Leaf { .. } => None,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseTreeNode::Leaf { token, .. } => Some(token),
            ParseTreeNode::Branch { .. } => None,
        }
    }

    pub fn children(&self) -> &[ParseTreeNode] {
        match self {
            ParseTreeNode::Branch { children, .. } => children,
            ParseTreeNode::Leaf { .. } => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ParseTreeNode::Leaf { .. })
    }

    /// Terminal tokens in left-to-right order
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            ParseTreeNode::Leaf { token, .. } => out.push(token),
            ParseTreeNode::Branch { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// All nodes of the given production, in pre-order
    pub fn find_all(&self, production: Production) -> Vec<&ParseTreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.production() == Some(production) {
                out.push(node);
            }
            stack.extend(node.children().iter().rev());
        }
        out
    }

    /// First direct child of the given production
    pub fn child(&self, production: Production) -> Option<&ParseTreeNode> {
        self.children()
            .iter()
            .find(|c| c.production() == Some(production))
    }
}
