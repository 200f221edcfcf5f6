//! The fixed sermon prompt.

/// Build the generation prompt for a topic and a scripture reference.
///
/// Both values are embedded verbatim. The template asks for six sections
/// (introduction, biblical context, three-point development, practical
/// application, conclusion, closing prayer) and roughly 1500-2000 words.
pub fn build_sermon_prompt(tema: &str, versiculo: &str) -> String {
    format!(
        "Gere um sermão cristão completo em português baseado no seguinte:

TEMA: {tema}
VERSÍCULO: {versiculo}

Estruture o sermão da seguinte forma:
1. INTRODUÇÃO - Uma introdução envolvente que conecte o tema com a vida cotidiana
2. CONTEXTO BÍBLICO - Explicação do contexto histórico e teológico do versículo
3. DESENVOLVIMENTO - 3 pontos principais com explicações e aplicações práticas
4. APLICAÇÃO - Como aplicar o ensino na vida diária
5. CONCLUSÃO - Resumo inspirador e chamada à ação
6. ORAÇÃO FINAL - Uma oração relacionada ao tema

O sermão deve ter aproximadamente 1500-2000 palavras, ser teologicamente sólido, inspirador e prático para os ouvintes."
    )
}
