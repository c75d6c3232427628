//! Customer-facing message texts.
//!
//! Shared texts live here; handlers format the dynamic ones in place.

pub const GREETING: &str = "Olá! Bem-vindo à nossa loja de celulares.";

pub const MENU_OPTIONS: &str = "Como podemos te ajudar? Por favor, escolha uma das opções abaixo:\n\
    1️⃣ - 📱 Comprar um aparelho\n\
    2️⃣ - 🔧 Assistência Técnica\n\
    3️⃣ - 💰 Vender seu aparelho usado\n\
    4️⃣ - 👨‍💼 Falar com um atendente\n\
    5️⃣ - ❌ Sair";

pub const HELLO_AGAIN: &str = "Olá novamente! Como podemos te ajudar?";

pub const DID_NOT_UNDERSTAND: &str = "Desculpe, não entendi sua mensagem.";

pub const INVALID_MENU_OPTION: &str = "Opção inválida. Por favor, selecione uma das opções enviadas.";

pub const FAREWELL: &str = "Obrigado pelo contato. Se precisar de algo, estamos à disposição!";

pub const ANYTHING_ELSE: &str = "Tudo bem! Se precisar de algo mais, estamos à disposição.";

pub const RESTART: &str = "Desculpe, ocorreu um erro. Vamos começar novamente.";

pub const AGENT_SOON: &str = "Um de nossos atendentes entrará em contato com você em breve.";

pub const AGENT_WAIT: &str = "Por favor, aguarde. Um atendente entrará em contato em breve.";

pub const ASK_MODEL_NAME: &str = "Qual modelo de celular você está procurando? \
    Por favor, digite o nome do modelo ou parte dele (exemplo: iPhone 12).";

pub const PRODUCT_LIST_HEADER: &str = "✨📱 LISTA DE APARELHOS DISPONÍVEIS 📱✨";

pub const PRODUCT_LIST_PROMPT: &str = "Por favor, digite o número do modelo que você deseja:\n\
    ou\n\
    N - Escolher outro modelo\n\
    M - Menu Principal\n\
    S - Sair";

pub const PRODUCT_NOT_FOUND: &str = "Desculpe, não encontramos esse produto em nosso estoque.";

pub const PRODUCT_NOT_FOUND_OPTIONS: &str = "Você pode tentar um modelo parecido (exemplo: iPhone 11 em vez de iPhone 12), ou:\n\
    M - Menu Principal\n\
    S - Sair";

pub const CATALOG_ERROR: &str = "Desculpe, ocorreu um erro ao buscar os produtos disponíveis.";

pub const INVALID_MODEL_NUMBER: &str = "Opção inválida. Por favor, digite o número do modelo desejado.";

pub const INVALID_MODEL_INPUT: &str = "Entrada inválida. Por favor, digite o número correspondente ao modelo desejado.";

pub const CONFIRM_YES_OR_NO: &str = "Desculpe, não entendi. Responda com 'Sim' ou 'Não'.";

pub const PAYMENT_OPTIONS: &str = "Escolha a forma de pagamento:\n\
    1️⃣ - Cartão de Crédito (parcelado, com a taxa da maquininha)\n\
    2️⃣ - PIX/Dinheiro (com desconto)\n\
    3️⃣ - Dar um aparelho usado como parte do pagamento";

pub const INVALID_PAYMENT_OPTION: &str = "Opção inválida. Selecione 1, 2 ou 3 por favor.";

pub const INSTALLMENTS_PROMPT: &str = "Digite o número de parcelas (1 a 18):";

pub const INVALID_INSTALLMENTS: &str = "Opção inválida. Digite um número de parcelas entre 1 e 18.";

pub const PIX_SELECTED: &str = "Você selecionou PIX/Dinheiro. Você terá um desconto especial.";

pub const TRADE_IN_INTRO: &str = "Perfeito! Precisamos de algumas informações do aparelho que você vai entregar.";

pub const ASK_USED_MODEL: &str = "Qual o modelo do aparelho usado?";

pub const ASK_USED_STORAGE: &str = "Qual o armazenamento do aparelho (ex: 64GB, 128GB)?";

pub const ASK_USED_BATTERY: &str = "Como está a bateria do aparelho? (ex: Boa, Ruim, Saúde X%)";

pub const ASK_USED_FACE_ID: &str = "O Face ID está funcionando? (Sim / Não)";

pub const ASK_USED_DEFECTS: &str =
    "Há algum defeito, tela trincada ou algo parecido? Se sim, descreva. Se não, digite 'Não'.";

pub const COMPLEMENT_OPTIONS: &str = "Obrigado! Agora, como você deseja pagar a diferença?\n\
    1️⃣ - Cartão de Crédito (parcelado, com a taxa da maquininha)\n\
    2️⃣ - PIX/Dinheiro";

pub const INVALID_COMPLEMENT_OPTION: &str = "Opção inválida. Selecione 1 ou 2, por favor.";

pub const COMPLEMENT_PIX_SELECTED: &str = "Você escolheu PIX/Dinheiro para o restante. Ok!";

pub const ASK_CLIENT_DATA: &str = "Por favor, informe seus dados para finalizar:";

pub const ASK_NAME: &str = "NOME COMPLETO:";
pub const ASK_CPF: &str = "CPF:";
pub const ASK_PHONE: &str = "CEL:";
pub const ASK_ADDRESS: &str = "ENDEREÇO DA ENTREGA:";
pub const ASK_NEIGHBORHOOD: &str = "BAIRRO:";
pub const ASK_ZIP: &str = "CEP:";
pub const ASK_EMAIL: &str = "E-MAIL:";

pub const GENERATING_RECEIPT: &str = "Obrigado! Estamos gerando o recibo da sua compra...";

pub const RECEIPT_READY: &str = "Aqui está o seu recibo!";

pub const TECH_OPTIONS: &str = "Por favor, selecione o tipo de serviço de assistência técnica que você precisa:\n\
    1️⃣ - Trocar Tela\n\
    2️⃣ - Trocar Bateria\n\
    3️⃣ - Trocar Tampa Traseira\n\
    4️⃣ - Outro Problema";

pub const INVALID_TECH_OPTION: &str = "Opção inválida. Selecione uma opção válida.";

pub const ASK_REPAIR_MODEL: &str = "Por favor, informe o modelo do seu iPhone (exemplo: iPhone 12).";

pub const ASK_PROBLEM_DESCRIPTION: &str = "Por favor, descreva o problema que está enfrentando.";

pub const REPAIR_LOOKUP_ERROR: &str = "Desculpe, ocorreu um erro ao acessar nossas informações.";

pub const SERVICE_CONFIRM_PROMPT: &str = "Deseja prosseguir com o serviço?\nResponda com:\nSim ✅\nNão ❌";

pub const SERVICE_SCHEDULED: &str =
    "Obrigado! Seu serviço foi agendado. Nossa equipe entrará em contato para mais detalhes.";

pub const PROBLEM_RECEIVED: &str =
    "Obrigado por nos informar. Nossa equipe técnica irá analisar e entraremos em contato com o orçamento em breve.";

pub const SELL_INTRO: &str = "Que ótimo! Vamos avaliar o seu aparelho. Precisamos de algumas informações.";

pub const ASK_SELL_PHOTOS: &str = "Para finalizar, envie fotos do aparelho (frente, verso e tela ligada). \
    Se preferir, descreva o estado geral por texto.";

pub const SELL_DONE: &str =
    "Obrigado! Nossa equipe vai avaliar as informações e retornamos com uma proposta em breve.";

pub const IDLE_WARNING: &str =
    "Você ainda está aí? Sua sessão será encerrada em breve por inatividade.";

pub const SESSION_CLOSED: &str = "Sua sessão foi encerrada por inatividade. \
    Se precisar de algo, por favor, envie uma nova mensagem para iniciar um novo atendimento.";
