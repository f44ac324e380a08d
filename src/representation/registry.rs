use super::{
    AccessRenderer, AnnotationNodeRenderer, AnnotationValueRenderer, AttributeRenderer,
    ClassNodeRenderer, FieldNodeRenderer, IndexAwareRenderer, InnerClassNodeRenderer,
    InstructionListRenderer, InstructionRenderer, LabelRenderer,
    LocalVariableAnnotationNodeRenderer, LocalVariableNodeRenderer, MethodNodeRenderer,
    ParameterNodeRenderer, Renderer, TryCatchBlockNodeRenderer, TypeAnnotationNodeRenderer,
    TypePathRenderer, TypeReferenceRenderer, TypeRenderer,
};
use crate::jvm::code::{Instruction, Label};
use crate::jvm::model::{
    AnnotationNode, AnnotationValue, Attribute, ClassNode, FieldNode, InnerClassNode,
    LocalVariableAnnotationNode, LocalVariableNode, MethodNode, ParameterNode, TryCatchBlockNode,
    TypeAnnotationNode, TypePath, TypeReference,
};
use crate::jvm::AccessNode;
use crate::labels::LabelIndexLookup;
use crate::{Error, Node, NodeKind, NodeRef, Settings};
use log::debug;
use std::fmt;
use std::marker::PhantomData;
use std::sync::OnceLock;

/// Renderer for one kind of node, usable when the node type is only known at runtime
pub trait NodeRenderer: Send + Sync {
    /// Kind of the nodes this renders
    fn kind(&self) -> NodeKind;

    /// Render the node, or `None` if it is not of the right kind
    ///
    /// Without a lookup, labels are indexed from the node itself.
    fn render_node(
        &self,
        node: NodeRef<'_>,
        labels: Option<&mut LabelIndexLookup>,
    ) -> Option<String>;

    /// Simplified rendering, or `None` if the node is not of the right kind
    fn render_node_simplified(&self, node: NodeRef<'_>) -> Option<String>;
}

/// [`NodeRenderer`] for a renderer which does not care about label indices
pub struct PlainNodeRenderer<T: ?Sized, R> {
    renderer: R,
    node: PhantomData<fn(&T)>,
}

impl<T: ?Sized, R> PlainNodeRenderer<T, R> {
    pub fn new(renderer: R) -> PlainNodeRenderer<T, R> {
        PlainNodeRenderer {
            renderer,
            node: PhantomData,
        }
    }
}

impl<T, R> NodeRenderer for PlainNodeRenderer<T, R>
where
    T: Node + ?Sized,
    R: Renderer<T> + Send + Sync,
{
    fn kind(&self) -> NodeKind {
        T::KIND
    }

    fn render_node(
        &self,
        node: NodeRef<'_>,
        _labels: Option<&mut LabelIndexLookup>,
    ) -> Option<String> {
        T::from_node_ref(node).map(|node| self.renderer.render(node))
    }

    fn render_node_simplified(&self, node: NodeRef<'_>) -> Option<String> {
        T::from_node_ref(node).map(|node| self.renderer.render_simplified(node))
    }
}

/// [`NodeRenderer`] for a renderer which uses the label indices it is handed
pub struct IndexAwareNodeRenderer<T: ?Sized, R> {
    renderer: R,
    node: PhantomData<fn(&T)>,
}

impl<T: ?Sized, R> IndexAwareNodeRenderer<T, R> {
    pub fn new(renderer: R) -> IndexAwareNodeRenderer<T, R> {
        IndexAwareNodeRenderer {
            renderer,
            node: PhantomData,
        }
    }
}

impl<T, R> NodeRenderer for IndexAwareNodeRenderer<T, R>
where
    T: Node + ?Sized,
    R: IndexAwareRenderer<T> + Send + Sync,
{
    fn kind(&self) -> NodeKind {
        T::KIND
    }

    fn render_node(
        &self,
        node: NodeRef<'_>,
        labels: Option<&mut LabelIndexLookup>,
    ) -> Option<String> {
        let node = T::from_node_ref(node)?;
        Some(match labels {
            Some(labels) => self.renderer.render_with_labels(node, labels),
            None => self.renderer.render(node),
        })
    }

    fn render_node_simplified(&self, node: NodeRef<'_>) -> Option<String> {
        T::from_node_ref(node).map(|node| self.renderer.render_simplified(node))
    }
}

/// Renders nodes of any kind
pub trait Representations {
    /// Renderer registered for the kind, if any
    fn renderer(&self, kind: NodeKind) -> Option<&dyn NodeRenderer>;

    /// Full rendering, `null` for an absent node
    fn render(&self, node: Option<NodeRef<'_>>) -> String;

    /// Full rendering using the label indices handed in, `null` for an absent node
    fn render_with_labels(&self, node: Option<NodeRef<'_>>, labels: &mut LabelIndexLookup)
        -> String;

    /// Simplified rendering, `null` for an absent node
    fn render_simplified(&self, node: Option<NodeRef<'_>>) -> String;
}

/// Registry of renderers, at most one per kind of node
///
/// Nodes without a renderer willing to render them fall back to their `Debug` output.
#[derive(Default)]
pub struct DefaultRepresentations {
    renderers: Vec<Box<dyn NodeRenderer>>,
}

static SHARED: OnceLock<DefaultRepresentations> = OnceLock::new();

impl DefaultRepresentations {
    /// Empty registry
    pub fn new() -> DefaultRepresentations {
        DefaultRepresentations { renderers: vec![] }
    }

    /// Registry with a renderer for every kind of node
    pub fn with_settings(settings: &Settings) -> DefaultRepresentations {
        let types = TypeRenderer::new(settings.type_name_mode);
        let mut annotation = AnnotationNodeRenderer::new(types);
        if settings.hide_annotation_values {
            annotation = annotation.hide_values();
        }
        let mut instruction = InstructionRenderer::new();
        if settings.hide_opcodes {
            instruction = instruction.hide_opcodes();
        }
        let instructions = InstructionListRenderer::new(instruction);
        let type_annotation = TypeAnnotationNodeRenderer::new(annotation);

        let renderers: Vec<Box<dyn NodeRenderer>> = vec![
            Box::new(IndexAwareNodeRenderer::<ClassNode, _>::new(
                ClassNodeRenderer::new(types, annotation, instructions),
            )),
            Box::new(PlainNodeRenderer::<FieldNode, _>::new(
                FieldNodeRenderer::new(types, annotation),
            )),
            Box::new(IndexAwareNodeRenderer::<MethodNode, _>::new(
                MethodNodeRenderer::new(types, annotation, instructions),
            )),
            Box::new(IndexAwareNodeRenderer::<[Instruction], _>::new(instructions)),
            Box::new(IndexAwareNodeRenderer::<Instruction, _>::new(instruction)),
            Box::new(IndexAwareNodeRenderer::<Label, _>::new(LabelRenderer)),
            Box::new(IndexAwareNodeRenderer::<LocalVariableNode, _>::new(
                LocalVariableNodeRenderer::new(types),
            )),
            Box::new(IndexAwareNodeRenderer::<LocalVariableAnnotationNode, _>::new(
                LocalVariableAnnotationNodeRenderer::new(type_annotation),
            )),
            Box::new(IndexAwareNodeRenderer::<TryCatchBlockNode, _>::new(
                TryCatchBlockNodeRenderer::new(types, type_annotation),
            )),
            Box::new(PlainNodeRenderer::<AnnotationNode, _>::new(annotation)),
            Box::new(PlainNodeRenderer::<TypeAnnotationNode, _>::new(type_annotation)),
            Box::new(PlainNodeRenderer::<AnnotationValue, _>::new(
                AnnotationValueRenderer::new(annotation),
            )),
            Box::new(PlainNodeRenderer::<ParameterNode, _>::new(
                ParameterNodeRenderer::default(),
            )),
            Box::new(PlainNodeRenderer::<InnerClassNode, _>::new(
                InnerClassNodeRenderer::new(types),
            )),
            Box::new(PlainNodeRenderer::<Attribute, _>::new(AttributeRenderer)),
            Box::new(PlainNodeRenderer::<AccessNode, _>::new(AccessRenderer)),
            Box::new(PlainNodeRenderer::<TypeReference, _>::new(TypeReferenceRenderer)),
            Box::new(PlainNodeRenderer::<TypePath, _>::new(TypePathRenderer)),
            Box::new(PlainNodeRenderer::<str, _>::new(types)),
        ];
        DefaultRepresentations { renderers }
    }

    /// Registry with default settings, built once and shared
    pub fn shared() -> &'static DefaultRepresentations {
        SHARED.get_or_init(|| DefaultRepresentations::with_settings(&Settings::new()))
    }

    /// Add a renderer for a kind which has none yet
    pub fn register(&mut self, renderer: Box<dyn NodeRenderer>) -> Result<(), Error> {
        let kind = renderer.kind();
        if self.renderer(kind).is_some() {
            debug!("Refusing second renderer for {:?}", kind);
            return Err(Error::DuplicateRenderer(kind));
        }
        self.renderers.push(renderer);
        Ok(())
    }

    /// Renderers to try for a node: the one for its kind, then all the others
    fn candidates(&self, kind: NodeKind) -> impl Iterator<Item = &dyn NodeRenderer> {
        let exact = self.renderer(kind);
        exact.into_iter().chain(
            self.renderers
                .iter()
                .map(|renderer| renderer.as_ref())
                .filter(move |renderer| renderer.kind() != kind),
        )
    }

    fn fallback(node: NodeRef<'_>) -> String {
        debug!("No renderer for {:?}", node.kind());
        format!("{:?}", node)
    }
}

impl Representations for DefaultRepresentations {
    fn renderer(&self, kind: NodeKind) -> Option<&dyn NodeRenderer> {
        self.renderers
            .iter()
            .find(|renderer| renderer.kind() == kind)
            .map(|renderer| renderer.as_ref())
    }

    fn render(&self, node: Option<NodeRef<'_>>) -> String {
        let node = match node {
            Some(node) => node,
            None => return String::from("null"),
        };
        self.candidates(node.kind())
            .find_map(|renderer| renderer.render_node(node, None))
            .unwrap_or_else(|| Self::fallback(node))
    }

    fn render_with_labels(
        &self,
        node: Option<NodeRef<'_>>,
        labels: &mut LabelIndexLookup,
    ) -> String {
        let node = match node {
            Some(node) => node,
            None => return String::from("null"),
        };
        for renderer in self.candidates(node.kind()) {
            if let Some(rendered) = renderer.render_node(node, Some(&mut *labels)) {
                return rendered;
            }
        }
        Self::fallback(node)
    }

    fn render_simplified(&self, node: Option<NodeRef<'_>>) -> String {
        let node = match node {
            Some(node) => node,
            None => return String::from("null"),
        };
        self.candidates(node.kind())
            .find_map(|renderer| renderer.render_node_simplified(node))
            .unwrap_or_else(|| Self::fallback(node))
    }
}

impl fmt::Debug for DefaultRepresentations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<NodeKind> = self.renderers.iter().map(|r| r.kind()).collect();
        f.debug_struct("DefaultRepresentations")
            .field("kinds", &kinds)
            .finish()
    }
}
