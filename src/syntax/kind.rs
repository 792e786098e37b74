//! Node kinds of the Dezyne syntax tree.
//!
//! Every variant carries only the fields relevant to that construct. Child
//! references are plain [`NodeId`]s into the owning [`SyntaxTree`] arena.
//!
//! [`SyntaxTree`]: super::SyntaxTree

use smol_str::SmolStr;

use super::NodeId;

/// The closed set of syntax constructs produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    // ---- scoped containers ----
    /// Top-level file scope.
    File { statements: Vec<NodeId> },
    /// `namespace N { ... }`
    Namespace { name: NodeId, body: Vec<NodeId> },
    /// `interface I { events; behavior { ... } }`
    InterfaceDefinition {
        name: NodeId,
        body: Vec<NodeId>,
        behavior: Option<NodeId>,
    },
    /// `component C { ports; behavior|system }`
    ComponentDefinition {
        name: NodeId,
        ports: Vec<NodeId>,
        body: Option<NodeId>,
    },
    /// `behavior [name] { ... }`
    Behavior {
        name: Option<NodeId>,
        body: Vec<NodeId>,
    },
    /// `system { instances; bindings }`
    System { body: Vec<NodeId> },

    // ---- declarations ----
    /// `import file.dzn;`
    ImportStatement { file_name: SmolStr },
    /// `extern name $value$;`
    ExternDeclaration { name: NodeId, value: SmolStr },
    /// `enum E { A, B };`
    EnumDefinition { name: NodeId, members: Vec<NodeId> },
    /// `subint name {from..to};`
    IntDefinition { name: NodeId, from: i64, to: i64 },
    /// `in void name(in T p);`
    Event {
        direction: NodeId,
        type_ref: NodeId,
        name: NodeId,
        parameters: Vec<NodeId>,
    },
    /// A formal parameter of an event.
    EventParameter {
        direction: Option<NodeId>,
        type_ref: NodeId,
        name: NodeId,
    },
    /// `provides I name;` / `requires I name;`
    Port {
        direction: NodeId,
        type_ref: NodeId,
        name: NodeId,
    },
    /// `Component name;` inside a system.
    Instance { type_ref: NodeId, name: NodeId },
    /// `a.p <=> b.q;`
    Binding { left: NodeId, right: NodeId },
    /// `T name [= initializer];`
    VariableDefinition {
        type_ref: NodeId,
        name: NodeId,
        initializer: Option<NodeId>,
    },
    /// `R name(params) { body }`
    FunctionDefinition {
        return_type: NodeId,
        name: NodeId,
        parameters: Vec<NodeId>,
        body: Option<NodeId>,
    },
    /// A formal parameter of a function.
    FunctionParameter {
        direction: Option<NodeId>,
        type_ref: NodeId,
        name: NodeId,
    },

    // ---- on statements ----
    /// `on trigger, trigger: statement`
    OnStatement {
        triggers: Vec<NodeId>,
        body: Option<NodeId>,
    },
    /// `port.event(params)` as written after `on`.
    OnTrigger {
        name: NodeId,
        parameters: Option<NodeId>,
    },
    /// The parenthesised parameter list of an on-trigger.
    OnParameterList { parameters: Vec<NodeId> },
    /// `name` or `name <- binding` inside an on-trigger.
    OnParameter {
        name: NodeId,
        assignment: Option<NodeId>,
    },

    // ---- statements ----
    /// `[condition] statement`
    GuardStatement {
        condition: Option<NodeId>,
        body: Option<NodeId>,
    },
    /// `{ statements }`
    Compound { statements: Vec<NodeId> },
    /// `if (condition) then [else otherwise]`
    IfStatement {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    /// `expression;`
    ExpressionStatement { expression: NodeId },
    /// `return [value];`
    ReturnStatement { value: Option<NodeId> },
    /// `[port.]reply([value]);`
    Reply {
        port: Option<NodeId>,
        value: Option<NodeId>,
    },

    // ---- expressions and names ----
    /// `callee(arguments)`
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    /// A dotted name inside a binding, `instance.port` or `.port`.
    CompoundBindingExpression {
        compound: Option<NodeId>,
        name: Option<NodeId>,
    },
    /// A dotted name, `compound.name`. Either side may be missing while
    /// the user is typing (`X.` or `.Y`).
    CompoundName {
        compound: Option<NodeId>,
        name: Option<NodeId>,
    },
    /// The type position of a declaration.
    TypeReference { type_name: NodeId },
    Identifier { text: SmolStr },
    Keyword { text: SmolStr },
    Literal { text: SmolStr },

    /// A subtree the parser could not fit into the grammar.
    Error { fragments: Vec<NodeId> },
}

impl NodeKind {
    /// Child node ids referenced by this kind, in source order.
    pub fn child_ids(&self) -> Vec<NodeId> {
        use NodeKind::*;

        let mut out = Vec::new();
        match self {
            File { statements } | Compound { statements } => out.extend(statements),
            Namespace { name, body } => {
                out.push(*name);
                out.extend(body);
            }
            InterfaceDefinition {
                name,
                body,
                behavior,
            } => {
                out.push(*name);
                out.extend(body);
                out.extend(behavior);
            }
            ComponentDefinition { name, ports, body } => {
                out.push(*name);
                out.extend(ports);
                out.extend(body);
            }
            Behavior { name, body } => {
                out.extend(name);
                out.extend(body);
            }
            System { body } => out.extend(body),
            ImportStatement { .. } | Identifier { .. } | Keyword { .. } | Literal { .. } => {}
            ExternDeclaration { name, .. } | IntDefinition { name, .. } => out.push(*name),
            EnumDefinition { name, members } => {
                out.push(*name);
                out.extend(members);
            }
            Event {
                direction,
                type_ref,
                name,
                parameters,
            } => {
                out.extend([*direction, *type_ref, *name]);
                out.extend(parameters);
            }
            EventParameter {
                direction,
                type_ref,
                name,
            }
            | FunctionParameter {
                direction,
                type_ref,
                name,
            } => {
                out.extend(direction);
                out.extend([*type_ref, *name]);
            }
            Port {
                direction,
                type_ref,
                name,
            } => out.extend([*direction, *type_ref, *name]),
            Instance { type_ref, name } => out.extend([*type_ref, *name]),
            Binding { left, right } => out.extend([*left, *right]),
            VariableDefinition {
                type_ref,
                name,
                initializer,
            } => {
                out.extend([*type_ref, *name]);
                out.extend(initializer);
            }
            FunctionDefinition {
                return_type,
                name,
                parameters,
                body,
            } => {
                out.extend([*return_type, *name]);
                out.extend(parameters);
                out.extend(body);
            }
            OnStatement { triggers, body } => {
                out.extend(triggers);
                out.extend(body);
            }
            OnTrigger { name, parameters } => {
                out.push(*name);
                out.extend(parameters);
            }
            OnParameterList { parameters } => out.extend(parameters),
            OnParameter { name, assignment } => {
                out.push(*name);
                out.extend(assignment);
            }
            GuardStatement { condition, body } => {
                out.extend(condition);
                out.extend(body);
            }
            IfStatement {
                condition,
                then_branch,
                else_branch,
            } => {
                out.extend([*condition, *then_branch]);
                out.extend(else_branch);
            }
            ExpressionStatement { expression } => out.push(*expression),
            ReturnStatement { value } => out.extend(value),
            Reply { port, value } => {
                out.extend(port);
                out.extend(value);
            }
            CallExpression { callee, arguments } => {
                out.push(*callee);
                out.extend(arguments);
            }
            CompoundBindingExpression { compound, name } | CompoundName { compound, name } => {
                out.extend(compound);
                out.extend(name);
            }
            TypeReference { type_name } => out.push(*type_name),
            Error { fragments } => out.extend(fragments),
        }
        out
    }

    /// Whether this construct introduces a lexical scope.
    pub fn is_scoped_block(&self) -> bool {
        matches!(
            self,
            NodeKind::File { .. }
                | NodeKind::Namespace { .. }
                | NodeKind::InterfaceDefinition { .. }
                | NodeKind::ComponentDefinition { .. }
                | NodeKind::Behavior { .. }
                | NodeKind::FunctionDefinition { .. }
                | NodeKind::OnStatement { .. }
                | NodeKind::GuardStatement { .. }
                | NodeKind::Compound { .. }
        )
    }

    /// Whether this declaration can be named in a type position.
    pub fn declares_type(&self) -> bool {
        matches!(
            self,
            NodeKind::Namespace { .. }
                | NodeKind::InterfaceDefinition { .. }
                | NodeKind::ComponentDefinition { .. }
                | NodeKind::EnumDefinition { .. }
                | NodeKind::IntDefinition { .. }
                | NodeKind::ExternDeclaration { .. }
        )
    }

    /// The name identifier of a named declaration.
    pub fn declaration_name(&self) -> Option<NodeId> {
        use NodeKind::*;

        match self {
            Namespace { name, .. }
            | InterfaceDefinition { name, .. }
            | ComponentDefinition { name, .. }
            | ExternDeclaration { name, .. }
            | EnumDefinition { name, .. }
            | IntDefinition { name, .. }
            | Event { name, .. }
            | EventParameter { name, .. }
            | Port { name, .. }
            | Instance { name, .. }
            | VariableDefinition { name, .. }
            | FunctionDefinition { name, .. }
            | FunctionParameter { name, .. }
            | OnParameter { name, .. } => Some(*name),
            _ => None,
        }
    }

    /// Text of identifier, keyword and literal tokens.
    pub fn token_text(&self) -> Option<&str> {
        match self {
            NodeKind::Identifier { text } | NodeKind::Keyword { text } | NodeKind::Literal { text } => {
                Some(text.as_str())
            }
            _ => None,
        }
    }

    /// Short name of the variant, for logs and error messages.
    pub fn name(&self) -> &'static str {
        use NodeKind::*;

        match self {
            File { .. } => "File",
            Namespace { .. } => "Namespace",
            InterfaceDefinition { .. } => "InterfaceDefinition",
            ComponentDefinition { .. } => "ComponentDefinition",
            Behavior { .. } => "Behavior",
            System { .. } => "System",
            ImportStatement { .. } => "ImportStatement",
            ExternDeclaration { .. } => "ExternDeclaration",
            EnumDefinition { .. } => "EnumDefinition",
            IntDefinition { .. } => "IntDefinition",
            Event { .. } => "Event",
            EventParameter { .. } => "EventParameter",
            Port { .. } => "Port",
            Instance { .. } => "Instance",
            Binding { .. } => "Binding",
            VariableDefinition { .. } => "VariableDefinition",
            FunctionDefinition { .. } => "FunctionDefinition",
            FunctionParameter { .. } => "FunctionParameter",
            OnStatement { .. } => "OnStatement",
            OnTrigger { .. } => "OnTrigger",
            OnParameterList { .. } => "OnParameterList",
            OnParameter { .. } => "OnParameter",
            GuardStatement { .. } => "GuardStatement",
            Compound { .. } => "Compound",
            IfStatement { .. } => "IfStatement",
            ExpressionStatement { .. } => "ExpressionStatement",
            ReturnStatement { .. } => "ReturnStatement",
            Reply { .. } => "Reply",
            CallExpression { .. } => "CallExpression",
            CompoundBindingExpression { .. } => "CompoundBindingExpression",
            CompoundName { .. } => "CompoundName",
            TypeReference { .. } => "TypeReference",
            Identifier { .. } => "Identifier",
            Keyword { .. } => "Keyword",
            Literal { .. } => "Literal",
            Error { .. } => "Error",
        }
    }
}
